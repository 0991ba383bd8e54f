//! Server-delivered menu structure.
//!
//! The menu is the source of truth for which routes a session may access.
//! The client trusts it as delivered; no authorization checks are performed
//! on it here.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One entry of the server-delivered menu.
///
/// Top-level nodes are groupings; their children are the navigable pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MenuNode {
    /// Display label, also used as the route name.
    pub name: String,

    /// Route path segment, relative to the layout root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Identifier of the view to lazily load, relative to the views root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Child entries, present on grouping nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// True if this node maps to a navigable page.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.component.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// True if this node only groups others and must never become a route.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.is_navigable()
    }
}

/// Parses the serialized `menuList` payload as written by the login flow.
///
/// # Errors
///
/// Returns an error if the payload is not a valid JSON sequence of nodes.
pub fn parse_menu(raw: &str) -> DomainResult<Vec<MenuNode>> {
    serde_json::from_str(raw).map_err(|e| DomainError::MalformedMenu(e.to_string()))
}

/// Serializes a menu into the `menuList` storage payload.
///
/// # Errors
///
/// Returns an error if the menu cannot be encoded, which plain menu data
/// cannot normally trigger.
pub fn serialize_menu(menu: &[MenuNode]) -> DomainResult<String> {
    serde_json::to_string(menu).map_err(|e| DomainError::MalformedMenu(e.to_string()))
}
