//! LDPS client core - persisted state and order lifecycle for a local
//! delivery booking app
//!
//! Everything behind the screens that has a correctness contract:
//!
//! - **store**: redb-backed key-value persistence for the user profile,
//!   login flag and order history
//! - **booking**: fare calculation, routing estimate and order ID generation
//! - **orders**: order creation plus the timer-driven status progression
//!   (`searching → assigned → in_transit → delivered`)
//! - **session**: login/logout state loaded from the store
//!
//! # Control Flow
//!
//! ```text
//! booking flow → OrdersManager::create_order → Store (redb)
//!                        │
//!                        └─ start_progression → ProgressionWorker
//!                               │ every 5s: persist next status
//!                               └─ broadcast OrderUpdate to observers
//! ```
//!
//! Rendering, navigation and animation are external collaborators; this
//! crate only exposes in-process calls.

pub mod booking;
pub mod models;
pub mod orders;
pub mod session;
pub mod store;
pub mod util;

// Re-export public types
pub use models::{Order, OrderStatus, User};
pub use orders::{
    ManagerError, ManagerResult, OrderUpdate, OrdersManager, ProgressionHandle, DRIVER_NAMES,
    STATUS_TICK,
};
pub use session::Session;
pub use store::{StorageError, StorageResult, Store};
