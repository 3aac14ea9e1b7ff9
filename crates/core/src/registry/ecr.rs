//! Amazon ECR implementation of [`RegistryClient`]

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecr::{
    Client,
    config::{Credentials, Region},
    error::DisplayErrorContext,
};

use super::{RegistryClient, RegistryError};
use crate::{config::PluginConfig, error::Result};

const CREDENTIALS_PROVIDER: &str = "drone-plugin";

/// ECR client bound to the region of the configured registry
#[derive(Debug, Clone)]
pub struct EcrClient {
    client: Client,
}

impl EcrClient {
    /// Build a client for the registry in `config`.
    ///
    /// Static credentials are used when both keys are configured; otherwise
    /// the default AWS credential chain applies.
    pub async fn from_config(config: &PluginConfig) -> Result<Self> {
        let region = config.region()?.to_string();
        tracing::debug!("Creating ECR client for region {}", region);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region));
        if config.has_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        let sdk_config = loader.load().await;
        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

#[async_trait]
impl RegistryClient for EcrClient {
    async fn proxy_endpoint(&self) -> std::result::Result<String, RegistryError> {
        let output = self
            .client
            .get_authorization_token()
            .send()
            .await
            .map_err(|e| RegistryError::Service(DisplayErrorContext(&e).to_string()))?;

        output
            .authorization_data()
            .first()
            .and_then(|data| data.proxy_endpoint())
            .map(str::to_string)
            .ok_or_else(|| {
                RegistryError::Service("authorization token response had no endpoint".to_string())
            })
    }

    async fn create_repository(&self, name: &str) -> std::result::Result<(), RegistryError> {
        match self
            .client
            .create_repository()
            .repository_name(name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                let exists = e
                    .as_service_error()
                    .is_some_and(|service| service.is_repository_already_exists_exception());
                if exists {
                    Err(RegistryError::AlreadyExists(name.to_string()))
                } else {
                    Err(RegistryError::Service(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }
}
