//! redb-based persistence for the booking client
//!
//! One table, three logical records:
//!
//! | Key | Value | Purpose |
//! |-----|-------|---------|
//! | `user` | `User` | Profile (at most one) |
//! | `auth` | `bool` | Login flag (absent ⇒ false) |
//! | `orders` | `Vec<Order>` | Order history, most-recent-first |
//!
//! Values are JSON-serialized. Every mutation runs inside a single write
//! transaction, so the order list is read-modify-written as a critical
//! section and no partial state is ever observable by a subsequent read.
//!
//! redb commits are durable as soon as `commit()` returns, which is what
//! keeps order state consistent across app restarts and forced kills.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Order, OrderStatus, User};

/// Single state table: key = logical record name, value = JSON bytes
const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("ldps_state");

const USER_KEY: &str = "user";
const AUTH_KEY: &str = "auth";
const ORDERS_KEY: &str = "orders";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Namespaced key-value store backed by redb.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open or create the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Generic Record Access ==========

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;

        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn write_record<T: Serialize>(&self, key: &str, record: &T) -> StorageResult<()> {
        let value = serde_json::to_vec(record)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== User / Login Flag ==========

    /// Overwrite the single stored user record.
    pub fn save_user(&self, user: &User) -> StorageResult<()> {
        self.write_record(USER_KEY, user)
    }

    /// The stored user, or `None` if none has ever been saved.
    pub fn get_user(&self) -> StorageResult<Option<User>> {
        self.read_record(USER_KEY)
    }

    pub fn set_logged_in(&self, flag: bool) -> StorageResult<()> {
        self.write_record(AUTH_KEY, &flag)
    }

    /// Absent flag reads as `false`.
    pub fn is_logged_in(&self) -> StorageResult<bool> {
        Ok(self.read_record(AUTH_KEY)?.unwrap_or(false))
    }

    // ========== Orders ==========

    /// The full order history, most-recently-added first.
    pub fn get_orders(&self) -> StorageResult<Vec<Order>> {
        Ok(self.read_record(ORDERS_KEY)?.unwrap_or_default())
    }

    /// Prepend an order to the persisted history.
    ///
    /// The read-modify-write runs inside one write transaction, so
    /// concurrent writers cannot lose updates.
    pub fn save_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            let mut orders: Vec<Order> = match table.get(ORDERS_KEY)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => Vec::new(),
            };
            orders.insert(0, order.clone());
            let value = serde_json::to_vec(&orders)?;
            table.insert(ORDERS_KEY, value.as_slice())?;
        }
        txn.commit()?;
        tracing::debug!(order_id = %order.id, "Order persisted");
        Ok(())
    }

    /// Set an order's status, and its driver fields when provided.
    ///
    /// `None` never clears an already-set driver field. An unknown
    /// `order_id` is a silent no-op: navigation can race ahead of a bulk
    /// clear, and a late tick must not fail loudly.
    pub fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        driver_name: Option<&str>,
        driver_rating: Option<f64>,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            let mut orders: Vec<Order> = match table.get(ORDERS_KEY)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => Vec::new(),
            };

            let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
                tracing::debug!(order_id = %order_id, "Status update for unknown order ignored");
                return Ok(());
            };

            order.status = status;
            if let Some(name) = driver_name {
                order.driver_name = Some(name.to_string());
            }
            if let Some(rating) = driver_rating {
                order.driver_rating = Some(rating);
            }

            let value = serde_json::to_vec(&orders)?;
            table.insert(ORDERS_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Bulk Clear ==========

    /// Remove user, login flag and order history in one transaction.
    ///
    /// Keys that are already absent stay absent; clearing twice is fine.
    pub fn clear_all(&self) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.remove(USER_KEY)?;
            table.remove(AUTH_KEY)?;
            table.remove(ORDERS_KEY)?;
        }
        txn.commit()?;
        tracing::debug!("Store cleared");
        Ok(())
    }
}
