//! Route materialization
//!
//! One-time conversion of menu data into router-registered navigable paths.

mod materializer;

pub use materializer::{RouteMaterializer, materialize};
