//! Opaque session credential.

use serde::{Deserialize, Serialize};

/// Opaque session token issued by the authentication server.
///
/// The client never inspects the credential; only its presence matters for
/// navigation decisions. It is created at login, overwritten by silent
/// refresh, and removed on refresh failure or logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps a raw credential string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential, for the refresh request body and auth headers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the token carries no credential at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short prefix safe to log. The full credential never reaches logs.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.len() > 12 {
            format!("{}...", &self.0[..8])
        } else {
            self.0.clone()
        }
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}
