//! In-memory route table.
//!
//! Stands in for the host router: it holds the static shell routes,
//! accepts dynamically materialized children, and resolves bare paths the
//! way the hash-history router would — unmatched paths fall through to the
//! catch-all redirect once one is registered.

use async_trait::async_trait;
use gatehouse_application::Router;
use gatehouse_domain::{RouteDescriptor, ShellConfig, ViewRef};
use tokio::sync::RwLock;
use tracing::debug;

/// A route known to the table, static or materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    /// Route name.
    pub name: String,
    /// Absolute path.
    pub path: String,
    /// Name of the parent route, breadcrumb/active-menu metadata.
    pub parent: Option<String>,
    /// Lazy view reference, when the route loads a view.
    pub view: Option<ViewRef>,
}

/// Result of resolving a navigation path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path matched a registered route.
    Matched(RegisteredRoute),
    /// Nothing matched; the catch-all redirects the navigation.
    CatchAll {
        /// Path the catch-all redirects to.
        redirect: String,
    },
    /// Nothing matched and no catch-all is registered yet.
    NotFound,
}

#[derive(Debug, Default)]
struct TableState {
    routes: Vec<RegisteredRoute>,
    catch_all: Option<String>,
    forced_redirect: Option<String>,
}

/// In-memory [`Router`] adapter.
pub struct RouteTable {
    state: RwLock<TableState>,
}

impl RouteTable {
    /// Creates a table seeded with the shell's static routes: the layout
    /// root with its landing and user-center children, and the standalone
    /// login page.
    #[must_use]
    pub fn new(config: &ShellConfig) -> Self {
        let layout = config.layout_route.clone();
        let routes = vec![
            RegisteredRoute {
                name: layout.clone(),
                path: "/".to_string(),
                parent: None,
                view: None,
            },
            RegisteredRoute {
                name: "Home".to_string(),
                path: config.home_path.clone(),
                parent: Some(layout.clone()),
                view: Some(ViewRef::new(&config.views_root, "index/index")),
            },
            RegisteredRoute {
                name: "UserCenter".to_string(),
                path: "/userCenter".to_string(),
                parent: Some(layout),
                view: Some(ViewRef::new(&config.views_root, "userCenter/index")),
            },
            RegisteredRoute {
                name: "Login".to_string(),
                path: config.login_path.clone(),
                parent: None,
                view: Some(ViewRef::new(&config.views_root, "Login")),
            },
        ];
        Self {
            state: RwLock::new(TableState {
                routes,
                catch_all: None,
                forced_redirect: None,
            }),
        }
    }

    /// Resolves a bare path (no query string) against the table.
    pub async fn resolve(&self, path: &str) -> Resolution {
        let state = self.state.read().await;
        if let Some(route) = state.routes.iter().find(|route| route.path == path) {
            return Resolution::Matched(route.clone());
        }
        match &state.catch_all {
            Some(redirect) => Resolution::CatchAll {
                redirect: redirect.clone(),
            },
            None => Resolution::NotFound,
        }
    }

    /// The last forced redirect issued through the [`Router`] port, for the
    /// host shell to act on.
    pub async fn last_redirect(&self) -> Option<String> {
        self.state.read().await.forced_redirect.clone()
    }
}

#[async_trait]
impl Router for RouteTable {
    async fn add_child(&self, parent: &str, route: RouteDescriptor) {
        let path = format!("/{}", route.path.trim_start_matches('/'));
        let mut state = self.state.write().await;
        state.routes.push(RegisteredRoute {
            name: route.name,
            path,
            parent: Some(parent.to_string()),
            view: Some(route.view),
        });
    }

    async fn add_catch_all(&self, redirect: &str) {
        self.state.write().await.catch_all = Some(redirect.to_string());
    }

    async fn route_count(&self) -> usize {
        self.state.read().await.routes.len()
    }

    async fn has_route(&self, name: &str) -> bool {
        self.state
            .read()
            .await
            .routes
            .iter()
            .any(|route| route.name == name)
    }

    async fn redirect(&self, path: &str) {
        debug!(path, "forced redirect");
        self.state.write().await.forced_redirect = Some(path.to_string());
    }
}
