//! Silent token renewal.
//!
//! Two trigger paths feed one coordination mechanism. The timer path runs
//! on an interval and treats failure as transient. The on-demand path is
//! invoked by a request that already failed authentication and treats
//! failure as fatal. Both funnel through a single-flight core: at most one
//! refresh call is in flight at any time, and every caller arriving while
//! one is pending settles together with it.

use std::sync::Arc;
use std::time::Duration;

use gatehouse_domain::Token;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::ports::{AuthApi, AuthError, Router, SessionStorage};
use crate::session::SessionContext;

type RefreshResult = Result<Token, AuthError>;

/// Coordination state for in-flight refreshes.
#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshResult>>,
}

/// Renews the session token, coalescing concurrent triggers into one
/// endpoint call.
///
/// There is no cancellation: an in-flight refresh always runs to
/// completion, and a navigation away does not abort it.
pub struct TokenRefresher<S, A, R> {
    session: SessionContext<S>,
    api: Arc<A>,
    router: Arc<R>,
    login_path: String,
    state: Mutex<RefreshState>,
}

impl<S: SessionStorage, A: AuthApi, R: Router> TokenRefresher<S, A, R> {
    /// Creates a refresher bound to the session's token.
    #[must_use]
    pub fn new(
        session: SessionContext<S>,
        api: Arc<A>,
        router: Arc<R>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            api,
            router,
            login_path: login_path.into(),
            state: Mutex::new(RefreshState::default()),
        }
    }

    /// Single-flight core. The first caller issues the endpoint call;
    /// everyone else queues on a oneshot and receives the same settlement.
    async fn refresh_once(&self) -> RefreshResult {
        let pending = {
            let mut state = self.state.lock().await;
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = pending {
            return rx
                .await
                .unwrap_or_else(|_| Err(AuthError::Network("refresh task dropped".to_string())));
        }

        let result = self.call_endpoint().await;

        let waiters = {
            let mut state = self.state.lock().await;
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A closed receiver stopped caring; everyone else settles with
            // the same outcome.
            let _ = waiter.send(result.clone());
        }
        result
    }

    async fn call_endpoint(&self) -> RefreshResult {
        let Some(token) = self.session.token().await else {
            return Err(AuthError::MissingToken);
        };
        let renewed = self.api.refresh(&token).await?;
        self.session
            .set_token(renewed.clone())
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        info!(token = %renewed.preview(), "token refreshed");
        Ok(renewed)
    }

    /// Timer path: silent renewal on an interval tick.
    ///
    /// Failure here is transient: it is logged and the old token stays in
    /// place for an optimistic retry on the next tick. This path never
    /// forces a logout — a transient network blip must not log out an
    /// otherwise idle user.
    pub async fn tick(&self) {
        if self.session.token().await.is_none() {
            return;
        }
        if let Err(err) = self.refresh_once().await {
            warn!(%err, "timer refresh failed, keeping current token");
        }
    }

    /// On-demand path, triggered by a request that failed authentication.
    ///
    /// Failure here is fatal: the triggering request already proved the
    /// current token invalid, so the stored token is cleared and the client
    /// is forced to the login route.
    ///
    /// # Errors
    ///
    /// Propagates the refresh failure to the request path that triggered
    /// it; every continuation queued behind the same in-flight call is
    /// rejected with the same error.
    pub async fn refresh_for_request(&self) -> RefreshResult {
        match self.refresh_once().await {
            Ok(token) => Ok(token),
            Err(err) => {
                error!(%err, "on-demand refresh failed, forcing re-login");
                if let Err(storage_err) = self.session.clear_token().await {
                    warn!(%storage_err, "failed to clear stored token");
                }
                self.router.redirect(&self.login_path).await;
                Err(err)
            }
        }
    }
}

/// Recurring silent-refresh task.
pub struct RefreshLoop;

impl RefreshLoop {
    /// Spawns the background loop. Every `interval` it attempts a
    /// timer-path refresh; ticks with no token present do nothing. The task
    /// runs until the runtime shuts down.
    pub fn spawn<S, A, R>(
        refresher: Arc<TokenRefresher<S, A, R>>,
        interval: Duration,
    ) -> JoinHandle<()>
    where
        S: SessionStorage + 'static,
        A: AuthApi + 'static,
        R: Router + 'static,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first interval tick fires immediately; skip it so a fresh
            // login is not refreshed right away.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                refresher.tick().await;
            }
        })
    }
}
