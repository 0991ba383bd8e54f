//! View loading port

use async_trait::async_trait;
use gatehouse_domain::ViewRef;
use thiserror::Error;

/// Handle to a loaded view, opaque to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    /// The resolved lazy-load reference.
    pub view: ViewRef,
}

/// Errors surfaced when a lazily referenced view is first loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The reference resolves to no known view.
    #[error("unresolvable view: {0}")]
    Unresolvable(String),

    /// The view exists but failed to load.
    #[error("view load failed: {0}")]
    LoadFailed(String),
}

/// Port for lazily loading views referenced by route descriptors.
///
/// A malformed menu entry produces a descriptor whose load fails here, at
/// first navigation, never at materialization time. The failure surfaces
/// to the view layer, not to the guard.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Loads the view behind a lazy reference.
    ///
    /// # Errors
    ///
    /// Returns an error when the reference is unknown or loading fails.
    async fn load(&self, view: &ViewRef) -> Result<ViewHandle, ViewError>;
}
