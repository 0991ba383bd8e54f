//! Router-addressable route descriptors derived from the menu.

use serde::{Deserialize, Serialize};

use crate::menu::MenuNode;

/// Reference to a lazily loaded view, already joined to the views root.
///
/// The reference is resolved by the view-loading collaborator at first
/// navigation. An identifier that resolves to nothing fails there, never
/// earlier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    /// Joins a component identifier to the views root prefix.
    #[must_use]
    pub fn new(views_root: &str, component: &str) -> Self {
        let root = views_root.trim_end_matches('/');
        let component = component.trim_start_matches('/');
        if root.is_empty() {
            Self(component.to_string())
        } else {
            Self(format!("{root}/{component}"))
        }
    }

    /// The full lazy-load reference, e.g. `views/user/List`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A route entry derived from one navigable menu node.
///
/// Exactly one descriptor exists per eligible node; the parent's name rides
/// along as metadata for breadcrumb and active-menu logic downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Route name, taken from the menu node's display label.
    pub name: String,
    /// Path segment, relative to the layout root.
    pub path: String,
    /// Name of the grouping node this route came from.
    pub parent_name: String,
    /// Lazy-load reference for the route's view.
    pub view: ViewRef,
}

impl RouteDescriptor {
    /// Derives a descriptor from a child menu node, or `None` when the node
    /// carries no component identifier and is a pure menu grouping.
    #[must_use]
    pub fn from_menu_node(node: &MenuNode, parent_name: &str, views_root: &str) -> Option<Self> {
        let component = node.component.as_deref().filter(|c| !c.is_empty())?;
        Some(Self {
            name: node.name.clone(),
            path: node.path.clone().unwrap_or_default(),
            parent_name: parent_name.to_string(),
            view: ViewRef::new(views_root, component),
        })
    }
}
