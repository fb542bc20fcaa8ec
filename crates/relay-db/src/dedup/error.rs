//! Error handling utilities for dedup stores

use relay_core::StoreError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to StoreError
pub fn map_db_error(e: SqlxError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}
