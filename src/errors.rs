use crate::core::repository::StorageError;
use thiserror::Error;

/// Crate-level error for startup and database bootstrap.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection or schema failure reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Failure surfaced through the storage port
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Socket binding or serving failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
