//! OrdersManager - booking creation and lifecycle entry points
//!
//! # Booking Flow
//!
//! ```text
//! create_order(pickup, drop)
//!     ├─ 1. Validate both addresses (nothing invalid is ever persisted)
//!     ├─ 2. Estimate distance, compute fare
//!     ├─ 3. Generate order ID, stamp creation time
//!     ├─ 4. Persist with status `searching`
//!     └─ 5. Return the order
//! ```
//!
//! Status transitions are driven by a spawned [`ProgressionWorker`] and
//! observed through the broadcast channel returned by [`subscribe`].
//!
//! [`ProgressionWorker`]: super::progression::ProgressionWorker
//! [`subscribe`]: OrdersManager::subscribe

use chrono::{SecondsFormat, Utc};
use tokio::sync::broadcast;

use crate::booking;
use crate::models::{Order, OrderStatus};
use crate::store::Store;

use super::error::{ManagerError, ManagerResult};
use super::progression::{ProgressionHandle, ProgressionWorker};

/// Update channel capacity (a handful of slow-cadence transitions per order)
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// One completed status transition, as broadcast to observers.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    pub driver_name: Option<String>,
    pub driver_rating: Option<f64>,
}

/// Owns order creation and drives status progression.
pub struct OrdersManager {
    store: Store,
    update_tx: broadcast::Sender<OrderUpdate>,
}

impl OrdersManager {
    pub fn new(store: Store) -> Self {
        let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self { store, update_tx }
    }

    /// Create and persist a booking with status `searching`.
    ///
    /// Rejects a missing pickup or drop address before an order is
    /// constructed; nothing is persisted on validation failure.
    pub fn create_order(&self, pickup_address: &str, drop_address: &str) -> ManagerResult<Order> {
        let pickup = pickup_address.trim();
        let drop = drop_address.trim();
        if pickup.is_empty() {
            return Err(ManagerError::MissingAddress("pickup"));
        }
        if drop.is_empty() {
            return Err(ManagerError::MissingAddress("drop"));
        }

        let distance = booking::calculate_distance(&mut rand::thread_rng());
        let price = booking::calculate_price(distance);

        let order = Order {
            id: booking::generate_order_id(),
            pickup_address: pickup.to_string(),
            drop_address: drop.to_string(),
            distance,
            price,
            status: OrderStatus::Searching,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            driver_name: None,
            driver_rating: None,
        };

        self.store.save_order(&order)?;
        tracing::info!(
            order_id = %order.id,
            distance = order.distance,
            price = order.price,
            "Order created"
        );

        Ok(order)
    }

    /// Fetch one order for display; absent ids are an explicit error the
    /// caller renders as an empty state.
    pub fn get_order(&self, order_id: &str) -> ManagerResult<Order> {
        self.store
            .get_orders()?
            .into_iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Full order history, most-recent-first.
    pub fn list_orders(&self) -> ManagerResult<Vec<Order>> {
        Ok(self.store.get_orders()?)
    }

    /// Subscribe to completed status transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderUpdate> {
        self.update_tx.subscribe()
    }

    /// Start (or resume) status progression for an order.
    ///
    /// The worker picks up from whatever status is persisted, so calling
    /// this after a restart continues the lifecycle rather than resetting
    /// it. Returns `OrderNotFound` when the id has no stored order.
    pub fn start_progression(&self, order_id: &str) -> ManagerResult<ProgressionHandle> {
        // Fail early on unknown ids instead of spawning a worker that
        // would only discover the gap on its first tick.
        let order = self.get_order(order_id)?;
        if order.status.is_terminal() {
            tracing::debug!(order_id = %order.id, "Order already delivered, progression not started");
        }

        let worker = ProgressionWorker::new(
            self.store.clone(),
            order.id.clone(),
            self.update_tx.clone(),
        );
        Ok(worker.spawn())
    }
}
