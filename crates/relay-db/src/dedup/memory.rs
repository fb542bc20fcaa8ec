//! In-process DedupStore for single-instance deployments and tests

use async_trait::async_trait;
use dashmap::DashSet;

use relay_core::{DedupStore, IdempotencyKey, RecordOutcome, StoreResult};

/// DedupStore backed by a concurrent hash set
///
/// Records are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDedupStore {
    keys: DashSet<IdempotencyKey>,
}

impl MemoryDedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl DedupStore for MemoryDedupStore {
    async fn seen(&self, key: &IdempotencyKey) -> StoreResult<bool> {
        Ok(self.keys.contains(key))
    }

    async fn record(&self, key: &IdempotencyKey) -> StoreResult<RecordOutcome> {
        Ok(if self.keys.insert(key.clone()) {
            RecordOutcome::Inserted
        } else {
            RecordOutcome::AlreadyPresent
        })
    }
}
