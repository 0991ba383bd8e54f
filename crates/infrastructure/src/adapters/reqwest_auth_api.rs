//! Token refresh endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use gatehouse_application::{AuthApi, AuthError};
use gatehouse_domain::{DomainResult, ShellConfig, Token};
use serde::{Deserialize, Serialize};

/// Request timeout, matching the shell's HTTP client default.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    token: &'a str,
}

/// Successful response from the refresh endpoint.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}

/// `AuthApi` adapter over the authentication server's HTTP endpoint.
///
/// Posts `{"token": ...}` to the configured refresh endpoint and expects
/// `{"token": ...}` back. Any non-success status or transport error is a
/// refresh failure; redirects are never followed.
pub struct ReqwestAuthApi {
    http_client: reqwest::Client,
    refresh_url: url::Url,
}

impl ReqwestAuthApi {
    /// Creates a client for the configured authentication server.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn new(config: &ShellConfig) -> DomainResult<Self> {
        Ok(Self {
            http_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            refresh_url: config.refresh_url()?,
        })
    }
}

#[async_trait]
impl AuthApi for ReqwestAuthApi {
    async fn refresh(&self, token: &Token) -> Result<Token, AuthError> {
        let response = self
            .http_client
            .post(self.refresh_url.clone())
            .json(&RefreshRequest {
                token: token.as_str(),
            })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { message });
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Network(format!("failed to parse refresh response: {e}")))?;

        Ok(Token::new(body.token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_targets_configured_endpoint() {
        let api = ReqwestAuthApi::new(&ShellConfig::default()).unwrap();
        assert_eq!(
            api.refresh_url.as_str(),
            "http://localhost:8000/api-token-refresh/"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected_at_construction() {
        let config = ShellConfig {
            base_url: "not a url".to_string(),
            ..ShellConfig::default()
        };
        assert!(ReqwestAuthApi::new(&config).is_err());
    }

    #[test]
    fn test_refresh_request_wire_shape() {
        let body = serde_json::to_string(&RefreshRequest { token: "abc" }).unwrap();
        assert_eq!(body, r#"{"token":"abc"}"#);

        let response: RefreshResponse = serde_json::from_str(r#"{"token":"def"}"#).unwrap();
        assert_eq!(response.token, "def");
    }
}
