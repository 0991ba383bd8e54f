//! One-time conversion of the menu into registered routes.

use gatehouse_domain::{MenuNode, RouteDescriptor, ShellConfig};
use tokio::sync::Mutex;
use tracing::info;

use crate::ports::Router;

/// Derives route descriptors from a menu. Pure; registration is
/// [`RouteMaterializer::install`]'s concern.
///
/// For each top-level node with children, each child with a non-empty
/// component identifier yields one descriptor. Children without one are
/// menu groupings, not pages, and are skipped. No authorization checks run
/// here, and an unresolvable component identifier still yields a
/// descriptor: its load fails at first navigation, in the view layer.
#[must_use]
pub fn materialize(menu: &[MenuNode], views_root: &str) -> Vec<RouteDescriptor> {
    let mut routes = Vec::new();
    for group in menu {
        let Some(children) = &group.children else {
            continue;
        };
        for child in children {
            if let Some(route) = RouteDescriptor::from_menu_node(child, &group.name, views_root) {
                routes.push(route);
            }
        }
    }
    routes
}

/// Registers materialized routes with the host router, exactly once per
/// menu.
///
/// Idempotence is internal: the materializer remembers a fingerprint of the
/// menu it installed, and the check and the registration happen under one
/// lock. Two navigations racing before the session flag is set cannot
/// double-register.
pub struct RouteMaterializer {
    layout_parent: String,
    views_root: String,
    home_path: String,
    installed: Mutex<Option<String>>,
}

impl RouteMaterializer {
    /// Creates a materializer targeting the configured layout route.
    #[must_use]
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            layout_parent: config.layout_route.clone(),
            views_root: config.views_root.clone(),
            home_path: config.home_path.clone(),
            installed: Mutex::new(None),
        }
    }

    /// Installs the menu's routes and the catch-all fallback.
    ///
    /// Returns how many descriptors this call registered: zero when the
    /// same menu is already installed. A different menu (after re-login)
    /// installs again.
    pub async fn install<R: Router>(&self, menu: &[MenuNode], router: &R) -> usize {
        let fingerprint = format!("{menu:?}");

        let mut installed = self.installed.lock().await;
        if installed.as_deref() == Some(fingerprint.as_str()) {
            return 0;
        }

        let routes = materialize(menu, &self.views_root);
        let count = routes.len();
        for route in routes {
            router.add_child(&self.layout_parent, route).await;
        }
        // Unmatched paths fall through to the default landing route.
        router.add_catch_all(&self.home_path).await;

        *installed = Some(fingerprint);
        info!(count, "menu routes installed");
        count
    }

    /// Forgets the installed menu so the next [`install`](Self::install)
    /// runs again. Called on logout.
    pub async fn reset(&self) {
        *self.installed.lock().await = None;
    }
}
