//! Dedup store implementations
//!
//! Implementations of the `DedupStore` port defined in relay-core.

mod error;
mod memory;
mod postgres;

pub use error::map_db_error;
pub use memory::MemoryDedupStore;
pub use postgres::PgDedupStore;
