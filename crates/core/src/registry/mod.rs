//! Container registry provisioning
//!
//! Before a push, the plugin can make sure the target repository exists. The
//! registry service is reached through [`RegistryClient`], which exposes only
//! the two calls provisioning needs.

mod ecr;

pub use ecr::EcrClient;

use async_trait::async_trait;

use crate::{
    config::PluginConfig,
    error::{Error, Result},
};

/// Failure reported by a registry service call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The repository being created is already present
    #[error("repository already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Service(String),
}

/// The registry operations used while provisioning
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Endpoint URL of the registry the current credentials authorize,
    /// e.g. `https://0123456789.dkr.ecr.us-east-1.amazonaws.com`
    async fn proxy_endpoint(&self) -> std::result::Result<String, RegistryError>;

    /// Create a repository named `name`
    async fn create_repository(&self, name: &str) -> std::result::Result<(), RegistryError>;
}

/// Extract the region from a registry hostname.
///
/// ECR hostnames look like `<account>.dkr.ecr.<region>.amazonaws.com`; the
/// region is the fourth dot-separated component.
pub fn parse_region(registry: &str) -> Result<&str> {
    registry
        .split('.')
        .nth(3)
        .ok_or_else(|| Error::InvalidRegistry(registry.to_string()))
}

/// Make sure `config.repository` exists in `config.registry`.
///
/// Re-running against an existing repository succeeds. Nothing is retried.
pub async fn ensure_repository<C>(config: &PluginConfig, client: &C) -> Result<()>
where
    C: RegistryClient + ?Sized,
{
    if config.repository.is_empty() {
        return Err(Error::MissingRepository);
    }

    let endpoint = client
        .proxy_endpoint()
        .await
        .map_err(|e| Error::AuthorizationError(e.to_string()))?;
    let target_registry = endpoint.strip_prefix("https://").unwrap_or(&endpoint);

    if target_registry != config.registry {
        tracing::debug!(
            "Authorized registry {} does not match {}",
            target_registry,
            config.registry
        );
        return Err(Error::RegistryMismatch(config.registry.clone()));
    }

    match client.create_repository(&config.repository).await {
        Ok(()) => {
            tracing::info!("Created repository {}", config.repository);
            Ok(())
        }
        Err(RegistryError::AlreadyExists(_)) => {
            tracing::info!("Repository {} already exists", config.repository);
            Ok(())
        }
        Err(RegistryError::Service(message)) => Err(Error::ProvisioningError(message)),
    }
}
