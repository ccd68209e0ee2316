//! Session identity for integration requests.

use serde::{Deserialize, Serialize};

/// The (user, org) pair that scopes every backend request.
///
/// Both identifiers are opaque strings supplied by the host application
/// and are never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User identifier.
    pub user: String,
    /// Organization identifier.
    pub org: String,
}

impl Session {
    /// Create a new session identity.
    pub fn new(user: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            org: org.into(),
        }
    }

    /// Query parameters attached to every integration request.
    pub fn query(&self) -> [(&'static str, &str); 2] {
        [("user_id", &self.user), ("org_id", &self.org)]
    }
}
