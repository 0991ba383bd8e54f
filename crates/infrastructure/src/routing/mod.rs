//! Routing adapters

mod route_table;

pub use route_table::{RegisteredRoute, Resolution, RouteTable};
