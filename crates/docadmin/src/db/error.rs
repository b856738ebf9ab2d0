//! Database error types.

use sea_orm::DbErr;
use thiserror::Error;

use crate::lifecycle::FileStep;

/// Errors from database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error reported by SeaORM or the underlying driver.
    #[error("ORM error: {0}")]
    Orm(#[from] DbErr),

    /// A migration failed to apply.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The connection settings could not be turned into a URL.
    #[error("Invalid connection settings: {0}")]
    Connection(String),

    /// Another account already uses this account name.
    #[error("Account '{0}' already exists")]
    AccountExists(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A file was asked to move backward (or stay) in its lifecycle.
    #[error("Invalid file step transition for '{file_id}': {from} -> {to}")]
    InvalidStepTransition {
        file_id: String,
        from: FileStep,
        to: FileStep,
    },

    /// A stored label is not part of the lifecycle vocabulary.
    #[error("Corrupt column value: {0}")]
    UnknownLabel(#[from] crate::lifecycle::UnknownLabel),

    /// Failed to encode a JSON column.
    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),
}
