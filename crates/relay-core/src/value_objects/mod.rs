//! Value objects - immutable types that represent domain concepts

mod idempotency_key;
mod message_ts;

pub use idempotency_key::IdempotencyKey;
pub use message_ts::MessageTs;
