//! Router port

use async_trait::async_trait;
use gatehouse_domain::RouteDescriptor;

/// Port for the host router.
///
/// The materializer registers routes through this trait, and the fatal
/// refresh path issues forced redirects through it. The shell never walks
/// the route table itself; resolving a navigation stays the router's job.
#[async_trait]
pub trait Router: Send + Sync {
    /// Appends a route under the named parent route.
    async fn add_child(&self, parent: &str, route: RouteDescriptor);

    /// Registers the catch-all fallback redirecting every unmatched path.
    ///
    /// Registering it again replaces the previous redirect target.
    async fn add_catch_all(&self, redirect: &str);

    /// Number of registered routes, the catch-all excluded.
    async fn route_count(&self) -> usize;

    /// True if a route with the given name is registered.
    async fn has_route(&self, name: &str) -> bool;

    /// Forces navigation to `path`, outside the guard's decision flow.
    async fn redirect(&self, path: &str);
}
