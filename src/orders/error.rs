use thiserror::Error;

use crate::store::StorageError;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Missing {0} address")]
    MissingAddress(&'static str),
}

pub type ManagerResult<T> = Result<T, ManagerError>;
