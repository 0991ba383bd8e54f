//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;

/// A request about to go through the authenticated pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method name, uppercase.
    pub method: String,
    /// Path relative to the client's base URL.
    pub path: String,
    /// Header pairs; pipeline stages append to these.
    pub headers: Vec<(String, String)>,
    /// Serialized body, if any.
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Builds a bodyless request.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Response delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl InboundResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// True when the server refused the request's credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Transport-level failures: the request never produced a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, timeout, or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request itself could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Port for the raw HTTP transport underneath the pipeline stages.
///
/// Implementations carry no authentication logic; the pipeline owns the
/// stages, in a fixed order, so each one stays testable in isolation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns whatever response came back, error
    /// statuses included.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was produced at all.
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, TransportError>;
}
