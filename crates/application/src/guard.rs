//! Navigation guard
//!
//! The decision point executed before every navigation attempt.

use std::sync::Arc;

use gatehouse_domain::{GuardDecision, GuardInputs, NavAction, NavTarget, ShellConfig, classify};
use tracing::debug;

use crate::ports::{Router, SessionStorage};
use crate::routes::RouteMaterializer;
use crate::session::SessionContext;

/// Decides, for every navigation attempt, whether to proceed, redirect to
/// login, or first install the menu's routes.
///
/// Stateless between invocations: each call recomputes the decision table
/// from a fresh session snapshot. Every invocation resolves to exactly one
/// decision; nothing escapes the guard boundary as an error.
pub struct NavigationGuard<S, R> {
    session: SessionContext<S>,
    materializer: RouteMaterializer,
    router: Arc<R>,
    config: ShellConfig,
}

impl<S: SessionStorage, R: Router> NavigationGuard<S, R> {
    /// Creates a guard over the given session and router.
    #[must_use]
    pub fn new(session: SessionContext<S>, router: Arc<R>, config: ShellConfig) -> Self {
        Self {
            materializer: RouteMaterializer::new(&config),
            session,
            router,
            config,
        }
    }

    /// Decides one navigation attempt.
    ///
    /// On the install row this materializes the menu's routes, marks the
    /// session, and replays the original request in full — query and hash
    /// included — so deep links typed into the address bar are not lost to
    /// late route installation.
    pub async fn decide(&self, target: &NavTarget) -> GuardDecision {
        let snapshot = self.session.snapshot().await;
        let action = classify(
            GuardInputs {
                has_token: snapshot.has_token(),
                routes_installed: snapshot.routes_installed,
                has_menu: snapshot.has_menu(),
                target_allowed: self.config.is_allowed(target.path()),
            },
            &self.config.login_path,
        );

        let decision = match action {
            NavAction::Proceed => GuardDecision::Proceed,
            NavAction::Redirect(to) => GuardDecision::Redirect(to),
            NavAction::InstallRoutes => {
                self.materializer
                    .install(&snapshot.menu, self.router.as_ref())
                    .await;
                self.session.mark_routes_installed().await;
                GuardDecision::Redirect(target.full_path().to_string())
            }
        };

        debug!(target = target.full_path(), ?decision, "navigation decided");
        decision
    }

    /// Forgets installed routes alongside a session logout, so a later
    /// login materializes the new menu.
    pub async fn reset_routes(&self) {
        self.materializer.reset().await;
    }
}
