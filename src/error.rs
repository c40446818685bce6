//! Store error handling
//!
//! This module provides the unified error type for the persistence layer.
//! Constraint violations raised by PostgreSQL (duplicate natural keys,
//! dangling foreign keys) are mapped to typed variants so callers do not
//! have to inspect database error codes themselves.

use thiserror::Error;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres error code for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal store error")]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    /// Map a sqlx error to a typed store error for a given entity.
    ///
    /// Unique violations become [`StoreError::Conflict`] and foreign key
    /// violations become [`StoreError::NotFound`]; anything else stays a
    /// [`StoreError::Database`].
    pub fn from_db(err: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return StoreError::Conflict(format!("{entity} already exists"));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StoreError::NotFound(format!("{entity} references a missing row"));
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }

    /// True for the conflict variant, handy in tests
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
