//! Shell configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Configuration for the application shell.
///
/// Loadable from JSON; every field has a default matching the stock
/// deployment, so a partial config file only needs to name what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Base URL of the authentication server.
    pub base_url: String,
    /// Path of the token refresh endpoint, relative to `base_url`.
    pub refresh_endpoint: String,
    /// Seconds between silent refresh attempts on the timer path.
    pub refresh_interval_secs: u64,
    /// Prefix joined to menu component identifiers when loading views.
    pub views_root: String,
    /// Name of the layout route materialized routes are appended under.
    pub layout_route: String,
    /// Route of the login page.
    pub login_path: String,
    /// Default landing route; the catch-all redirects here.
    pub home_path: String,
    /// Paths navigable without a token.
    pub allow_list: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            refresh_endpoint: "/api-token-refresh/".to_string(),
            refresh_interval_secs: 240,
            views_root: "views/".to_string(),
            layout_route: "Layout".to_string(),
            login_path: "/login".to_string(),
            home_path: "/index".to_string(),
            allow_list: vec!["/login".to_string()],
        }
    }
}

impl ShellConfig {
    /// Interval between timer-path refresh attempts.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// True if `path` may be navigated without a token.
    #[must_use]
    pub fn is_allowed(&self, path: &str) -> bool {
        self.allow_list.iter().any(|allowed| allowed == path)
    }

    /// Absolute URL of the refresh endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or joined.
    pub fn refresh_url(&self) -> DomainResult<url::Url> {
        let base = url::Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(e.to_string()))?;
        base.join(&self.refresh_endpoint)
            .map_err(|e| DomainError::InvalidBaseUrl(e.to_string()))
    }
}
