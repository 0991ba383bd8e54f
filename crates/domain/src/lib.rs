//! Gatehouse Domain - Core shell types
//!
//! This crate defines the domain model for the Gatehouse application shell:
//! the server-delivered menu, the route descriptors derived from it, the
//! opaque session token, and the navigation decision table. All types here
//! are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod menu;
pub mod navigation;
pub mod route;
pub mod token;

pub use config::ShellConfig;
pub use error::{DomainError, DomainResult};
pub use menu::{MenuNode, parse_menu, serialize_menu};
pub use navigation::{GuardDecision, GuardInputs, NavAction, NavTarget, classify};
pub use route::{RouteDescriptor, ViewRef};
pub use token::Token;
