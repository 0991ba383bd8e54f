//! Authenticated request pipeline.
//!
//! Explicit middleware stages replace ad-hoc interception callbacks. Every
//! request runs through the same fixed order: the pre-request stage
//! attaches the session token, the post-response stage passes anything that
//! is not an authentication failure straight through, and the post-error
//! stage funnels authentication failures into the on-demand refresh path
//! and retries the request once with the renewed token.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::ports::{
    AuthApi, AuthError, HttpTransport, InboundResponse, OutboundRequest, Router, SessionStorage,
    TransportError,
};
use crate::refresh::TokenRefresher;
use crate::session::SessionContext;

/// Header carrying the session token, as the backend expects it.
pub const AUTHORIZATION_HEADER: &str = "AUTHORIZATION";

/// Failures surfaced by the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The transport produced no response at all.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The token could not be renewed; the session has already been
    /// cleared and the client redirected to login.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
}

/// HTTP client with fixed, explicit middleware stages.
///
/// Retries at most once per request: a second authentication failure after
/// a successful refresh is returned to the caller as-is rather than
/// looping.
pub struct AuthenticatedClient<S, A, R, T> {
    session: SessionContext<S>,
    refresher: Arc<TokenRefresher<S, A, R>>,
    transport: Arc<T>,
}

impl<S, A, R, T> AuthenticatedClient<S, A, R, T>
where
    S: SessionStorage,
    A: AuthApi,
    R: Router,
    T: HttpTransport,
{
    /// Wires the pipeline over a raw transport.
    #[must_use]
    pub fn new(
        session: SessionContext<S>,
        refresher: Arc<TokenRefresher<S, A, R>>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            session,
            refresher,
            transport,
        }
    }

    /// Runs one request through the stages.
    ///
    /// # Errors
    ///
    /// Returns a transport error when no response was produced, or an
    /// authentication error when the server rejected the token and the
    /// refresh path could not renew it.
    pub async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse, RequestError> {
        let prepared = self.pre_request(request.clone()).await;
        let response = self.transport.send(prepared).await?;
        if !response.is_unauthorized() {
            // Post-response stage: statuses other than an auth rejection
            // are the caller's business.
            return Ok(response);
        }

        // Post-error stage: the response proved the current token invalid.
        debug!(path = %request.path, "request rejected, renewing token");
        let renewed = self.refresher.refresh_for_request().await?;
        let mut retry = request;
        retry
            .headers
            .push((AUTHORIZATION_HEADER.to_string(), renewed.as_str().to_string()));
        Ok(self.transport.send(retry).await?)
    }

    /// Pre-request stage: attach the current token, if there is one.
    async fn pre_request(&self, mut request: OutboundRequest) -> OutboundRequest {
        if let Some(token) = self.session.token().await {
            request
                .headers
                .push((AUTHORIZATION_HEADER.to_string(), token.as_str().to_string()));
        }
        request
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gatehouse_domain::{RouteDescriptor, Token};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::ports::{StorageError, TOKEN_KEY};

    struct MockStorage {
        values: StdMutex<HashMap<String, String>>,
    }

    impl MockStorage {
        fn with_token(token: &str) -> Arc<Self> {
            let mut values = HashMap::new();
            values.insert(TOKEN_KEY.to_string(), token.to_string());
            Arc::new(Self {
                values: StdMutex::new(values),
            })
        }

        fn raw_token(&self) -> Option<String> {
            self.values
                .lock()
                .expect("lock poisoned")
                .get(TOKEN_KEY)
                .cloned()
        }
    }

    #[async_trait]
    impl SessionStorage for MockStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.lock().expect("lock poisoned").get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values
                .lock()
                .expect("lock poisoned")
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.values.lock().expect("lock poisoned").remove(key);
            Ok(())
        }

        async fn clear(&self) -> Result<(), StorageError> {
            self.values.lock().expect("lock poisoned").clear();
            Ok(())
        }
    }

    struct MockAuthApi {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn refresh(&self, token: &Token) -> Result<Token, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AuthError::Rejected {
                    message: "expired".to_string(),
                })
            } else {
                Ok(Token::new(format!("{}+1", token.as_str())))
            }
        }
    }

    #[derive(Default)]
    struct RecordingRouter {
        redirects: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl Router for RecordingRouter {
        async fn add_child(&self, _parent: &str, _route: RouteDescriptor) {}
        async fn add_catch_all(&self, _redirect: &str) {}
        async fn route_count(&self) -> usize {
            0
        }
        async fn has_route(&self, _name: &str) -> bool {
            false
        }
        async fn redirect(&self, path: &str) {
            self.redirects
                .lock()
                .expect("lock poisoned")
                .push(path.to_string());
        }
    }

    /// Transport scripted with a queue of responses, recording every
    /// request it sees.
    struct ScriptedTransport {
        responses: StdMutex<Vec<InboundResponse>>,
        seen: StdMutex<Vec<OutboundRequest>>,
    }

    impl ScriptedTransport {
        fn with_statuses(statuses: &[u16]) -> Arc<Self> {
            let responses = statuses
                .iter()
                .rev()
                .map(|&status| InboundResponse {
                    status,
                    body: String::new(),
                })
                .collect();
            Arc::new(Self {
                responses: StdMutex::new(responses),
                seen: StdMutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<OutboundRequest> {
            self.seen.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, TransportError> {
            self.seen.lock().expect("lock poisoned").push(request);
            self.responses
                .lock()
                .expect("lock poisoned")
                .pop()
                .ok_or_else(|| TransportError::Network("script exhausted".to_string()))
        }
    }

    async fn client_over(
        storage: Arc<MockStorage>,
        fail_refresh: bool,
        transport: Arc<ScriptedTransport>,
    ) -> (
        AuthenticatedClient<MockStorage, MockAuthApi, RecordingRouter, ScriptedTransport>,
        Arc<MockAuthApi>,
        Arc<RecordingRouter>,
    ) {
        let session = SessionContext::hydrate(storage).await.unwrap();
        let api = Arc::new(MockAuthApi {
            calls: AtomicUsize::new(0),
            fail: fail_refresh,
        });
        let router = Arc::new(RecordingRouter::default());
        let refresher = Arc::new(TokenRefresher::new(
            session.clone(),
            Arc::clone(&api),
            Arc::clone(&router),
            "/login",
        ));
        let client = AuthenticatedClient::new(session, refresher, transport);
        (client, api, router)
    }

    fn auth_header(request: &OutboundRequest) -> Option<&str> {
        request
            .headers
            .iter()
            .find(|(name, _)| name == AUTHORIZATION_HEADER)
            .map(|(_, value)| value.as_str())
    }

    #[tokio::test]
    async fn test_pre_request_attaches_token() {
        let transport = ScriptedTransport::with_statuses(&[200]);
        let (client, api, _) = client_over(
            MockStorage::with_token("abc"),
            false,
            Arc::clone(&transport),
        )
        .await;

        let response = client
            .execute(OutboundRequest::new("GET", "/users/"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(auth_header(&seen[0]), Some("abc"));
    }

    #[tokio::test]
    async fn test_rejected_request_refreshes_and_retries_once() {
        let transport = ScriptedTransport::with_statuses(&[401, 200]);
        let storage = MockStorage::with_token("abc");
        let (client, api, _) =
            client_over(Arc::clone(&storage), false, Arc::clone(&transport)).await;

        let response = client
            .execute(OutboundRequest::new("GET", "/users/"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(storage.raw_token().as_deref(), Some("abc+1"));
        let seen = transport.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(auth_header(&seen[1]), Some("abc+1"));
    }

    #[tokio::test]
    async fn test_second_rejection_is_not_retried_again() {
        let transport = ScriptedTransport::with_statuses(&[401, 401]);
        let (client, api, router) = client_over(
            MockStorage::with_token("abc"),
            false,
            Arc::clone(&transport),
        )
        .await;

        let response = client
            .execute(OutboundRequest::new("GET", "/users/"))
            .await
            .unwrap();

        assert!(response.is_unauthorized());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.seen().len(), 2);
        assert!(router.redirects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_surfaces_auth_error_and_redirects() {
        let transport = ScriptedTransport::with_statuses(&[401]);
        let storage = MockStorage::with_token("abc");
        let (client, _, router) =
            client_over(Arc::clone(&storage), true, Arc::clone(&transport)).await;

        let result = client.execute(OutboundRequest::new("GET", "/users/")).await;

        assert!(matches!(result, Err(RequestError::Auth(_))));
        assert!(storage.raw_token().is_none());
        assert_eq!(
            router.redirects.lock().unwrap().clone(),
            vec!["/login".to_string()]
        );
        // Only the original attempt reached the transport.
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_request_carries_no_header() {
        let transport = ScriptedTransport::with_statuses(&[200]);
        let storage = Arc::new(MockStorage {
            values: StdMutex::new(HashMap::new()),
        });
        let (client, _, _) = client_over(storage, false, Arc::clone(&transport)).await;

        client
            .execute(OutboundRequest::new("GET", "/health/"))
            .await
            .unwrap();

        assert_eq!(auth_header(&transport.seen()[0]), None);
    }
}
