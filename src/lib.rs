//! Umbrella crate for the workspace's integration tests; re-exports the core API
pub use facet_metamodel_core::*;
