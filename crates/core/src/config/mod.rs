//! Configuration management for the metamodel

pub mod keys;
mod settings;

// Re-export main types
pub use settings::MetaModelConfig;
