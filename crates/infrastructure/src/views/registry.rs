//! Lazily resolved view registry.

use std::collections::HashSet;

use async_trait::async_trait;
use gatehouse_application::{ViewError, ViewHandle, ViewLoader};
use gatehouse_domain::ViewRef;

/// [`ViewLoader`] backed by a static set of known views.
///
/// Mirrors a lazy-import failure: a menu entry whose component identifier
/// matches nothing registered here produces a route that fails only when
/// first navigated to. The guard never sees that failure.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    known: HashSet<String>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loadable view by its full reference, e.g.
    /// `views/user/List`.
    pub fn register(&mut self, view: impl Into<String>) {
        self.known.insert(view.into());
    }
}

#[async_trait]
impl ViewLoader for ViewRegistry {
    async fn load(&self, view: &ViewRef) -> Result<ViewHandle, ViewError> {
        if self.known.contains(view.as_str()) {
            Ok(ViewHandle { view: view.clone() })
        } else {
            Err(ViewError::Unresolvable(view.as_str().to_string()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_view_loads() {
        let mut registry = ViewRegistry::new();
        registry.register("views/user/List");

        let handle = registry
            .load(&ViewRef::new("views/", "user/List"))
            .await
            .unwrap();
        assert_eq!(handle.view.as_str(), "views/user/List");
    }

    #[tokio::test]
    async fn test_unknown_view_fails_at_load_time() {
        let registry = ViewRegistry::new();
        let err = registry
            .load(&ViewRef::new("views/", "missing/Page"))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Unresolvable(_)));
    }
}
