//! Order lifecycle for the booking client
//!
//! - **manager**: booking creation (validation, fare, ID) and lookup
//! - **progression**: cancellable 5-second timer advancing the status
//!   state machine, persisting each transition before broadcasting it
//!
//! # Data Flow
//!
//! ```text
//! create_order → Store (redb)
//! start_progression → ProgressionWorker ─ tick ─→ update_order_status
//!                                              └─→ broadcast OrderUpdate
//! ```

pub mod error;
pub mod manager;
pub mod progression;

pub use error::{ManagerError, ManagerResult};
pub use manager::{OrderUpdate, OrdersManager};
pub use progression::{ProgressionHandle, ProgressionWorker, DRIVER_NAMES, STATUS_TICK};
