//! Authentication endpoint port

use async_trait::async_trait;
use gatehouse_domain::Token;
use thiserror::Error;

/// Errors from the token refresh endpoint.
///
/// Cloneable so one settlement can be fanned out to every queued
/// continuation waiting on the same in-flight refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No token is available to refresh.
    #[error("no token available")]
    MissingToken,

    /// The server rejected the refresh.
    #[error("refresh rejected: {message}")]
    Rejected {
        /// Server-provided failure detail.
        message: String,
    },

    /// The request never reached a conclusive answer.
    #[error("network error: {0}")]
    Network(String),
}

/// Port for the authentication server's silent-refresh endpoint.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges the current token for a renewed one.
    ///
    /// # Errors
    ///
    /// Any non-success status or transport failure counts as a refresh
    /// failure; the caller decides whether that is fatal.
    async fn refresh(&self, token: &Token) -> Result<Token, AuthError>;
}
