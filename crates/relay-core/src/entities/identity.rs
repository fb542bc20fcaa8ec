//! Identity entity - a resolved chat user (display name and email)

use serde::{Deserialize, Serialize};

/// A chat user resolved from an opaque platform id
///
/// An unresolved identity has empty fields; it is produced when the
/// profile lookup fails and the pipeline continues with degraded content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Create a new Identity
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Identity with empty fields
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Check if the profile lookup produced anything usable
    #[inline]
    pub fn is_resolved(&self) -> bool {
        !self.name.is_empty() || !self.email.is_empty()
    }

    /// Email, if one is known
    pub fn email(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}
