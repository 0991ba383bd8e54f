//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the shell's coordination logic and
//! its external collaborators: the host router, the session storage, the
//! authentication endpoint, and the view loader. Each port is a trait
//! implemented by adapters in the infrastructure layer.

mod auth_api;
mod http_transport;
mod router;
mod session_storage;
mod view_loader;

pub use auth_api::{AuthApi, AuthError};
pub use http_transport::{HttpTransport, InboundResponse, OutboundRequest, TransportError};
pub use router::Router;
pub use session_storage::{MENU_KEY, SessionStorage, StorageError, TOKEN_KEY};
pub use view_loader::{ViewError, ViewHandle, ViewLoader};
