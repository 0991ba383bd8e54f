//! Navigation targets and the guard decision table.
//!
//! The guard is not a persisted automaton: every navigation attempt
//! re-evaluates the table below against current session state. [`classify`]
//! is the pure half of that evaluation; the side effects (installing routes,
//! marking the session) belong to the application layer.

/// The requested navigation target.
///
/// Keeps the full path, query and hash included, so that a deep link can be
/// replayed verbatim after late route installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    full_path: String,
}

impl NavTarget {
    /// Wraps a requested path such as `/users?x=1#top`.
    #[must_use]
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
        }
    }

    /// The full requested path, query string and hash preserved.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// The bare path, with query string and fragment stripped.
    #[must_use]
    pub fn path(&self) -> &str {
        let end = self
            .full_path
            .find(['?', '#'])
            .unwrap_or(self.full_path.len());
        &self.full_path[..end]
    }
}

/// Outcome of one guard invocation.
///
/// The guard always resolves to exactly one of these per navigation
/// attempt: never neither, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation continue.
    Proceed,
    /// Send the client to another path instead.
    Redirect(String),
}

/// Row selected from the decision table, before side effects run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Let the navigation continue.
    Proceed,
    /// Send the client elsewhere.
    Redirect(String),
    /// Valid session with routes not yet materialized: install them, then
    /// redirect to the originally requested full path.
    InstallRoutes,
}

/// Inputs to one decision-table evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardInputs {
    /// A non-empty token is present.
    pub has_token: bool,
    /// Routes have already been materialized this session.
    pub routes_installed: bool,
    /// The session holds a non-empty menu.
    pub has_menu: bool,
    /// The target path is navigable without a token.
    pub target_allowed: bool,
}

/// Selects the decision-table row for one navigation attempt.
///
/// Total over its inputs: every combination selects exactly one action.
/// A token without a menu means the session is stale (the token survived a
/// reload but the menu was never retrieved) and forces re-authentication.
#[must_use]
pub fn classify(inputs: GuardInputs, login_path: &str) -> NavAction {
    if inputs.has_token {
        if inputs.routes_installed {
            NavAction::Proceed
        } else if inputs.has_menu {
            NavAction::InstallRoutes
        } else {
            NavAction::Redirect(login_path.to_string())
        }
    } else if inputs.target_allowed {
        NavAction::Proceed
    } else {
        NavAction::Redirect(login_path.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGIN: &str = "/login";

    fn inputs(has_token: bool, routes_installed: bool, has_menu: bool) -> GuardInputs {
        GuardInputs {
            has_token,
            routes_installed,
            has_menu,
            target_allowed: false,
        }
    }

    #[test]
    fn test_absent_token_allowed_target_proceeds() {
        let action = classify(
            GuardInputs {
                target_allowed: true,
                ..inputs(false, false, false)
            },
            LOGIN,
        );
        assert_eq!(action, NavAction::Proceed);
    }

    #[test]
    fn test_absent_token_redirects_to_login() {
        let action = classify(inputs(false, false, false), LOGIN);
        assert_eq!(action, NavAction::Redirect(LOGIN.to_string()));
    }

    #[test]
    fn test_token_without_routes_installs_them() {
        let action = classify(inputs(true, false, true), LOGIN);
        assert_eq!(action, NavAction::InstallRoutes);
    }

    #[test]
    fn test_token_with_routes_proceeds() {
        // Menu presence is irrelevant once routes are installed.
        assert_eq!(classify(inputs(true, true, true), LOGIN), NavAction::Proceed);
        assert_eq!(classify(inputs(true, true, false), LOGIN), NavAction::Proceed);
    }

    #[test]
    fn test_stale_session_redirects_to_login() {
        // Token survived a reload but no menu was ever retrieved.
        let action = classify(inputs(true, false, false), LOGIN);
        assert_eq!(action, NavAction::Redirect(LOGIN.to_string()));
    }

    #[test]
    fn test_target_path_strips_query_and_hash() {
        assert_eq!(NavTarget::new("/users?x=1").path(), "/users");
        assert_eq!(NavTarget::new("/users#top").path(), "/users");
        assert_eq!(NavTarget::new("/users?x=1#top").path(), "/users");
        assert_eq!(NavTarget::new("/users").path(), "/users");
    }

    #[test]
    fn test_target_full_path_is_preserved() {
        let target = NavTarget::new("/users?x=1#top");
        assert_eq!(target.full_path(), "/users?x=1#top");
    }
}
