//! Plugin configuration and the environment it is read from and exported to

pub mod env;
mod settings;

// Re-export main types
pub use env::{EnvSource, EnvWriter, ProcessEnv, publish, step_name};
pub use settings::{PLUGIN_PREFIX, PluginConfig, plugin_var};
