use std::io;

/// Errors that can occur while preparing or running a plugin step
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("must specify a repository")]
    MissingRepository,

    #[error("could not parse region from registry: {0}")]
    InvalidRegistry(String),

    #[error("{0}")]
    AuthorizationError(String),

    #[error("provided credentials are not for the specified registry: {0}")]
    RegistryMismatch(String),

    #[error("{0}")]
    ProvisioningError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, Error>;
