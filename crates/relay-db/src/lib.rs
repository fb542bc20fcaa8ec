//! # relay-db
//!
//! Persistence for processed-event fingerprints.
//!
//! ## Overview
//!
//! This crate provides implementations of the `DedupStore` trait defined in
//! `relay-core`:
//!
//! - Connection pool management
//! - `PgDedupStore`, the durable store shared by all relay instances
//! - `MemoryDedupStore`, an in-process store for single-instance runs and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_db::{create_pool, PgDedupStore, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/relay")).await?;
//!     let store = PgDedupStore::new(pool);
//!     store.ensure_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod dedup;
pub mod pool;

// Re-export commonly used types
pub use dedup::{MemoryDedupStore, PgDedupStore};
pub use pool::{create_pool, PgPool, PoolConfig};
