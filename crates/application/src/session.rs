//! Owned session state shared by the guard and the refresh loop.
//!
//! The session is an explicitly owned context with a defined lifecycle:
//! [`SessionContext::hydrate`] on cold load, [`SessionContext::logout`] on
//! teardown. Exactly two writers exist — the guard flips the
//! routes-installed flag, the refresh paths rewrite the token — so no other
//! interleaving can leave the store half-updated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatehouse_domain::{MenuNode, Token, parse_menu, serialize_menu};
use tokio::sync::RwLock;
use tracing::warn;

use crate::ports::{MENU_KEY, SessionStorage, StorageError, TOKEN_KEY};

/// Consistent view of the session at one instant.
///
/// Guard decisions are computed from a snapshot taken under a single lock
/// acquisition, never from piecemeal reads.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Current token, if any.
    pub token: Option<Token>,
    /// Decoded menu; empty until the login flow stores one.
    pub menu: Vec<MenuNode>,
    /// True once the materializer has registered the menu's routes.
    pub routes_installed: bool,
}

impl SessionSnapshot {
    /// True if a non-empty token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// True if the menu holds at least one entry.
    #[must_use]
    pub fn has_menu(&self) -> bool {
        !self.menu.is_empty()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<Token>,
    menu: Vec<MenuNode>,
    routes_installed: bool,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Process-wide session context with an explicit lifecycle.
///
/// Cheap to clone; clones share the same state. Token and menu writes go
/// through to the storage adapter so they survive a reload within the tab;
/// the routes-installed flag is memory-only by design.
pub struct SessionContext<S> {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<S>,
}

impl<S> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: SessionStorage> SessionContext<S> {
    /// Cold-load initialization: reads `token` and `menuList` from storage.
    ///
    /// A malformed stored menu is treated as absent — the guard then sees a
    /// stale session and redirects to login — rather than failing hydration.
    /// The routes-installed flag always starts false.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage itself cannot be read.
    pub async fn hydrate(storage: Arc<S>) -> Result<Self, StorageError> {
        let token = storage
            .get(TOKEN_KEY)
            .await?
            .map(Token::new)
            .filter(|t| !t.is_empty());

        let menu = match storage.get(MENU_KEY).await? {
            Some(raw) => match parse_menu(&raw) {
                Ok(menu) => menu,
                Err(err) => {
                    warn!(%err, "stored menu is malformed, treating session as stale");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            state: Arc::new(RwLock::new(SessionState {
                token,
                menu,
                routes_installed: false,
                refreshed_at: None,
            })),
            storage,
        })
    }

    /// Takes a consistent snapshot for one guard decision.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            token: state.token.clone(),
            menu: state.menu.clone(),
            routes_installed: state.routes_installed,
        }
    }

    /// Current token, if any.
    pub async fn token(&self) -> Option<Token> {
        self.state.read().await.token.clone()
    }

    /// Overwrites the token, writing through to storage.
    ///
    /// Called by the refresh paths and the login flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails; memory is not updated
    /// in that case.
    pub async fn set_token(&self, token: Token) -> Result<(), StorageError> {
        self.storage.put(TOKEN_KEY, token.as_str()).await?;
        let mut state = self.state.write().await;
        state.token = Some(token);
        state.refreshed_at = Some(Utc::now());
        Ok(())
    }

    /// Removes the token from memory and storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage removal fails; the in-memory token is
    /// cleared regardless, so the guard stops trusting it immediately.
    pub async fn clear_token(&self) -> Result<(), StorageError> {
        self.state.write().await.token = None;
        self.storage.remove(TOKEN_KEY).await
    }

    /// Replaces the menu, writing through to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu cannot be serialized or stored.
    pub async fn set_menu(&self, menu: Vec<MenuNode>) -> Result<(), StorageError> {
        let raw = serialize_menu(&menu).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.storage.put(MENU_KEY, &raw).await?;
        self.state.write().await.menu = menu;
        Ok(())
    }

    /// Marks the menu's routes as installed. The guard is the only caller.
    pub async fn mark_routes_installed(&self) {
        self.state.write().await.routes_installed = true;
    }

    /// True once routes have been installed this session.
    pub async fn routes_installed(&self) -> bool {
        self.state.read().await.routes_installed
    }

    /// When the token was last successfully refreshed, if ever.
    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.refreshed_at
    }

    /// Teardown: clears storage and resets in-memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be cleared; memory is reset
    /// regardless.
    pub async fn logout(&self) -> Result<(), StorageError> {
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
        }
        self.storage.clear().await
    }
}
