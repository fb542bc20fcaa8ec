//! Deduplication store port

use async_trait::async_trait;

use crate::error::StoreError;
use crate::value_objects::IdempotencyKey;

/// Result type for dedup store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of committing a processed-event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// This call created the record
    Inserted,
    /// A concurrent or earlier caller already holds the record; nothing changed
    AlreadyPresent,
}

/// Persistent set of processed-event fingerprints
///
/// Implementations must enforce key uniqueness in the backing store itself,
/// so that two concurrent `record` calls for the same key commit exactly one
/// record and the loser observes `AlreadyPresent` instead of an error.
/// Records are never updated or deleted; the set grows without bound.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Check whether a record exists for the key
    async fn seen(&self, key: &IdempotencyKey) -> StoreResult<bool>;

    /// Commit a record for the key
    async fn record(&self, key: &IdempotencyKey) -> StoreResult<RecordOutcome>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
