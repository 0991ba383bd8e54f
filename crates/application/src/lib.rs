//! Gatehouse Application - shell coordination
//!
//! This crate holds the shell's state machines and the ports they drive:
//! the owned session context, the one-time route materializer, the
//! navigation guard, and the single-flight token refresher. Concrete
//! adapters for the ports live in the infrastructure layer.

pub mod guard;
pub mod http;
pub mod ports;
pub mod refresh;
pub mod routes;
pub mod session;

pub use guard::NavigationGuard;
pub use http::{AUTHORIZATION_HEADER, AuthenticatedClient, RequestError};
pub use ports::{
    AuthApi, AuthError, HttpTransport, InboundResponse, MENU_KEY, OutboundRequest, Router,
    SessionStorage, StorageError, TOKEN_KEY, TransportError, ViewError, ViewHandle, ViewLoader,
};
pub use refresh::{RefreshLoop, TokenRefresher};
pub use routes::{RouteMaterializer, materialize};
pub use session::{SessionContext, SessionSnapshot};
