//! The plugin pipeline: load, publish, provision, build the command

use crate::{
    command::{BazelCommand, BazelCommandBuilder},
    config::{self, EnvSource, EnvWriter, PluginConfig},
    error::Result,
    registry::{self, RegistryClient},
};

/// One plugin invocation, holding everything read from the environment
#[derive(Debug, Clone)]
pub struct PluginRunner {
    config: PluginConfig,
    step_name: Option<String>,
}

impl PluginRunner {
    pub fn new(config: PluginConfig, step_name: Option<String>) -> Self {
        Self { config, step_name }
    }

    /// Read the plugin settings and the CI step name from `source`
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> Result<Self> {
        let config = PluginConfig::from_env(source)?;
        let step_name = config::step_name(source);
        Ok(Self::new(config, step_name))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn step_name(&self) -> Option<&str> {
        self.step_name.as_deref()
    }

    /// Whether the repository should be provisioned before building
    pub fn should_provision(&self) -> bool {
        self.config.create_repository
    }

    /// Export build metadata and credentials through `writer`
    pub fn publish_env<W: EnvWriter + ?Sized>(&self, writer: &mut W) {
        config::publish(&self.config, writer);
    }

    /// Ensure the repository exists when provisioning is enabled
    pub async fn provision<C: RegistryClient + ?Sized>(&self, client: &C) -> Result<()> {
        if !self.should_provision() {
            tracing::debug!("Repository provisioning disabled");
            return Ok(());
        }

        tracing::info!(
            "Ensuring repository {} exists in {}",
            self.config.repository,
            self.config.registry
        );
        registry::ensure_repository(&self.config, client).await
    }

    /// The Bazel invocation for this step
    pub fn command(&self) -> BazelCommand {
        BazelCommandBuilder::build(&self.config, self.step_name())
    }
}
