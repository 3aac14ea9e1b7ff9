use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

use super::env::EnvSource;

/// Prefix shared by every plugin setting Drone passes through the environment
pub const PLUGIN_PREFIX: &str = "PLUGIN";

/// Plugin settings, loaded once from `PLUGIN_*` variables.
///
/// Empty strings mean "not set". The two credentials are kept out of both the
/// `Debug` and the JSON rendering.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PluginConfig {
    pub target: String,
    pub registry: String,
    pub create_repository: bool,
    pub repository: String,
    pub tag: String,
    #[serde(skip)]
    pub access_key: String,
    #[serde(skip)]
    pub secret_key: String,
    pub bazelrc: String,
    pub command: String,
    pub command_args: String,
    pub target_args: String,
}

impl PluginConfig {
    /// Load the configuration from `source`.
    ///
    /// Multi-word settings use `_` between words (`PLUGIN_COMMAND_ARGS`); the
    /// joined spelling (`PLUGIN_COMMANDARGS`) is still honoured when the split
    /// one is absent.
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> Result<Self> {
        let loader = Loader { source };

        let config = Self {
            target: loader.required("TARGET")?,
            registry: loader.required("REGISTRY")?,
            create_repository: loader.flag("CREATE_REPOSITORY")?,
            repository: loader.optional("REPOSITORY"),
            tag: loader.optional("TAG"),
            access_key: loader.optional("ACCESS_KEY"),
            secret_key: loader.optional("SECRET_KEY"),
            bazelrc: loader.optional("BAZELRC"),
            command: loader.optional("COMMAND"),
            command_args: loader.optional_or("COMMAND_ARGS", "COMMANDARGS"),
            target_args: loader.optional_or("TARGET_ARGS", "TARGETARGS"),
        };

        tracing::debug!("Loaded plugin configuration: {:?}", config);
        Ok(config)
    }

    /// Whether both halves of a static credential pair were supplied
    pub fn has_credentials(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }

    /// Region encoded in the registry hostname, e.g. `us-east-1` for
    /// `0123456789.dkr.ecr.us-east-1.amazonaws.com`
    pub fn region(&self) -> Result<&str> {
        crate::registry::parse_region(&self.registry)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "<redacted>" }
        }

        f.debug_struct("PluginConfig")
            .field("target", &self.target)
            .field("registry", &self.registry)
            .field("create_repository", &self.create_repository)
            .field("repository", &self.repository)
            .field("tag", &self.tag)
            .field("access_key", &redact(&self.access_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("bazelrc", &self.bazelrc)
            .field("command", &self.command)
            .field("command_args", &self.command_args)
            .field("target_args", &self.target_args)
            .finish()
    }
}

/// Build the full variable name for a setting, e.g. `PLUGIN_TARGET`
pub fn plugin_var(name: &str) -> String {
    format!("{PLUGIN_PREFIX}_{name}")
}

struct Loader<'a, S: EnvSource + ?Sized> {
    source: &'a S,
}

impl<S: EnvSource + ?Sized> Loader<'_, S> {
    fn optional(&self, name: &str) -> String {
        self.source.var(&plugin_var(name)).unwrap_or_default()
    }

    fn optional_or(&self, name: &str, legacy: &str) -> String {
        self.source
            .var(&plugin_var(name))
            .or_else(|| self.source.var(&plugin_var(legacy)))
            .unwrap_or_default()
    }

    fn required(&self, name: &str) -> Result<String> {
        let key = plugin_var(name);
        match self.source.var(&key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::ConfigError(format!(
                "required key {key} missing value"
            ))),
        }
    }

    fn flag(&self, name: &str) -> Result<bool> {
        let key = plugin_var(name);
        match self.source.var(&key) {
            None => Ok(false),
            Some(value) => parse_bool(&value).ok_or_else(|| {
                Error::ConfigError(format!("invalid boolean for {key}: {value:?}"))
            }),
        }
    }
}

/// Boolean spellings accepted for flag settings; empty counts as false
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        _ => None,
    }
}
