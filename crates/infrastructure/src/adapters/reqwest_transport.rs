//! Raw HTTP transport for the authenticated pipeline.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use gatehouse_application::{HttpTransport, InboundResponse, OutboundRequest, TransportError};
use gatehouse_domain::{DomainError, DomainResult, ShellConfig};

/// Request timeout, matching the shell's HTTP client default.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// `HttpTransport` adapter over reqwest.
///
/// Resolves request paths against the configured base URL and returns the
/// response verbatim, error statuses included; interpreting them is the
/// pipeline's job.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: url::Url,
}

impl ReqwestTransport {
    /// Creates a transport for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn new(config: &ShellConfig) -> DomainResult<Self> {
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(e.to_string()))?;
        Ok(Self {
            http_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
        })
    }

    fn resolve(&self, path: &str) -> Result<url::Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, TransportError> {
        let method = reqwest::Method::from_str(&request.method)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut builder = self
            .http_client
            .request(method, self.resolve(&request.path)?);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(InboundResponse { status, body })
    }
}
