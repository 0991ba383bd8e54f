//! View loading adapters

mod registry;

pub use registry::ViewRegistry;
