//! drone-bazelisk-ecr core - building blocks of a Drone plugin that runs Bazel
//!
//! This crate provides functionality to:
//! - Load plugin settings from `PLUGIN_*` environment variables
//! - Export build metadata and credentials for Bazel workspace-status scripts
//! - Provision an Amazon ECR repository before pushing to it
//! - Assemble and execute the Bazel command line
pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod runner;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{BazelCommand, BazelCommandBuilder};
pub use config::{EnvSource, EnvWriter, PluginConfig, ProcessEnv};
pub use registry::{EcrClient, RegistryClient, RegistryError};
pub use runner::PluginRunner;
