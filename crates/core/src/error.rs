use std::io;

/// Errors that can occur while building or querying the metamodel
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid type reference '{input}': {reason}")]
    TypeParseError { input: String, reason: String },

    #[error("Domain model error: {0}")]
    ModelError(String),

    #[error("Specification cache not yet initialized; object types cannot be looked up before init")]
    CacheNotInitialized,

    #[error("Specification cache already initialized")]
    CacheAlreadyInitialized,
}

/// Result type alias for metamodel operations
pub type Result<T> = std::result::Result<T, Error>;
