//! Gatehouse Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the refresh-endpoint HTTP client, an in-memory
//! route table standing in for the host router, a view registry, and the
//! session storage adapters.

pub mod adapters;
pub mod persistence;
pub mod routing;
pub mod views;

pub use adapters::{ReqwestAuthApi, ReqwestTransport};
pub use persistence::{FileSessionStorage, MemorySessionStorage};
pub use routing::{RegisteredRoute, Resolution, RouteTable};
pub use views::ViewRegistry;
