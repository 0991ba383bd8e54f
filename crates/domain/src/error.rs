//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base URL is invalid or malformed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A stored menu payload could not be decoded.
    #[error("malformed menu: {0}")]
    MalformedMenu(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
