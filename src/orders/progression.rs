//! Timer-driven order status progression
//!
//! A spawned worker advances one persisted order exactly one status per
//! tick until `delivered`, simulating dispatch and transit. Each tick
//! re-reads the stored order, so a worker started against an existing
//! order resumes from its persisted status rather than restarting.
//!
//! Every transition is written to the store before it is broadcast;
//! re-reading order state after a restart reflects the last completed
//! transition, never a lost in-flight one.
//!
//! The worker stops on its own at the terminal state or when the order
//! disappears from the store, and immediately when the handle is
//! cancelled. A tick that fails on storage is logged and ends the worker;
//! there is no caller left to propagate to.

use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::OrderStatus;
use crate::store::{StorageResult, Store};

use super::manager::OrderUpdate;

/// Fixed cadence between status transitions.
pub const STATUS_TICK: Duration = Duration::from_secs(5);

/// Roster a driver is picked from at the `assigned` transition.
pub const DRIVER_NAMES: &[&str] = &[
    "Raj Kumar",
    "Amit Singh",
    "Vikash Sharma",
    "Priya Patel",
    "Rahul Verma",
];

/// Outcome of a single progression tick.
enum Tick {
    /// Advanced one status; carries the broadcastable update
    Progressed(OrderUpdate),
    /// Already delivered, nothing left to do
    Terminal,
    /// The order is no longer in the store (e.g. bulk clear)
    Missing,
}

/// Handle to a running progression task.
///
/// Must be cancelled when the consumer detaches (view torn down); the
/// worker also exits on its own once the order is delivered.
pub struct ProgressionHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl ProgressionHandle {
    /// Stop the worker. Safe to call more than once.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the worker to exit (terminal state or cancellation).
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Worker advancing one order through the status sequence.
pub struct ProgressionWorker {
    store: Store,
    order_id: String,
    update_tx: broadcast::Sender<OrderUpdate>,
    shutdown: CancellationToken,
}

impl ProgressionWorker {
    pub fn new(
        store: Store,
        order_id: String,
        update_tx: broadcast::Sender<OrderUpdate>,
    ) -> Self {
        Self {
            store,
            order_id,
            update_tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Spawn the worker onto the runtime and return its handle.
    pub fn spawn(self) -> ProgressionHandle {
        let shutdown = self.shutdown.clone();
        let task = tokio::spawn(self.run());
        ProgressionHandle { shutdown, task }
    }

    /// Main loop: tick → advance → stop at terminal/missing/cancel.
    async fn run(self) {
        tracing::debug!(order_id = %self.order_id, "Status progression started");

        // First transition fires one full tick after start, like the
        // original interval behavior.
        let start = tokio::time::Instant::now() + STATUS_TICK;
        let mut tick = tokio::time::interval_at(start, STATUS_TICK);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match self.advance() {
                        Ok(Tick::Progressed(update)) => {
                            let terminal = update.status.is_terminal();
                            let _ = self.update_tx.send(update);
                            if terminal {
                                tracing::debug!(order_id = %self.order_id, "Order delivered, progression finished");
                                break;
                            }
                        }
                        Ok(Tick::Terminal) => break,
                        Ok(Tick::Missing) => {
                            tracing::warn!(order_id = %self.order_id, "Order vanished from store, stopping progression");
                            break;
                        }
                        Err(e) => {
                            tracing::error!(order_id = %self.order_id, error = %e, "Progression tick failed");
                            break;
                        }
                    }
                }
                _ = self.shutdown.cancelled() => {
                    tracing::debug!(order_id = %self.order_id, "Status progression cancelled");
                    break;
                }
            }
        }
    }

    /// Advance the persisted order exactly one status.
    fn advance(&self) -> StorageResult<Tick> {
        let orders = self.store.get_orders()?;
        let Some(order) = orders.into_iter().find(|o| o.id == self.order_id) else {
            return Ok(Tick::Missing);
        };

        let Some(next) = order.status.next() else {
            return Ok(Tick::Terminal);
        };

        let (driver_name, driver_rating) = if next == OrderStatus::Assigned {
            let (name, rating) = pick_driver(&mut rand::thread_rng());
            (Some(name), Some(rating))
        } else {
            // Keep whatever was assigned earlier
            (order.driver_name.clone(), order.driver_rating)
        };

        // Persist before anything observes the new state
        self.store.update_order_status(
            &self.order_id,
            next,
            driver_name.as_deref(),
            driver_rating,
        )?;

        tracing::info!(
            order_id = %self.order_id,
            status = ?next,
            driver = ?driver_name,
            "Order status advanced"
        );

        Ok(Tick::Progressed(OrderUpdate {
            order_id: self.order_id.clone(),
            status: next,
            driver_name,
            driver_rating,
        }))
    }
}

/// Pick a driver uniformly from the roster with a one-decimal rating in
/// [4.0, 5.0).
fn pick_driver<R: Rng>(rng: &mut R) -> (String, f64) {
    let name = DRIVER_NAMES[rng.gen_range(0..DRIVER_NAMES.len())].to_string();
    let rating = rng.gen_range(40..50) as f64 / 10.0;
    (name, rating)
}
