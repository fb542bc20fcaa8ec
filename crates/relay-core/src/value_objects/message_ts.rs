//! Message timestamp - the chat platform's message identifier within a channel
//!
//! Timestamps look like `1700000000.000100` and are opaque: they are compared
//! and forwarded as strings, never parsed into floating point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform message timestamp (`seconds.micros`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTs(String);

impl MessageTs {
    /// Create a new MessageTs
    pub fn new(ts: impl Into<String>) -> Self {
        Self(ts.into())
    }

    /// Get the timestamp as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Permalink form of the timestamp (`p` followed by the digits, dot removed)
    pub fn permalink_segment(&self) -> String {
        format!("p{}", self.0.replace('.', ""))
    }
}

impl fmt::Display for MessageTs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageTs {
    fn from(ts: &str) -> Self {
        Self(ts.to_string())
    }
}

impl From<String> for MessageTs {
    fn from(ts: String) -> Self {
        Self(ts)
    }
}
