use anyhow::Result;
use clap::Parser;

use bazelisk_ecr_core::command::bazel_command::DEFAULT_PROGRAM;

use crate::commands::run_command;

/// Drone plugin that runs a Bazel target, optionally creating its ECR repository first
#[derive(Parser, Debug)]
#[command(name = "drone-bazelisk-ecr")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:
    PLUGIN_TARGET              Bazel target to run (required)
    PLUGIN_REGISTRY            ECR registry hostname (required)
    PLUGIN_CREATE_REPOSITORY   Create PLUGIN_REPOSITORY before running
    PLUGIN_REPOSITORY          Repository to create, exported as DRONE_ECR_REPOSITORY
    PLUGIN_TAG                 Image tag, exported as DRONE_ECR_TAG
    PLUGIN_ACCESS_KEY          AWS access key id (with PLUGIN_SECRET_KEY)
    PLUGIN_SECRET_KEY          AWS secret access key (with PLUGIN_ACCESS_KEY)
    PLUGIN_BAZELRC             Startup --bazelrc file
    PLUGIN_COMMAND             Bazel subcommand (default: run)
    PLUGIN_COMMAND_ARGS        Flags placed before the target
    PLUGIN_TARGET_ARGS         Flags passed to the target after --
    DRONE_STEP_NAME            Recorded as --build_metadata=STEP_NAME=<name>
    BAZEL_BINARY               Bazel binary to invoke (same as --bazel)
    RUST_LOG=debug             Enable debug logging")]
pub struct Cli {
    /// Print the command and exported variables without running anything
    #[arg(short, long)]
    pub dry_run: bool,

    /// Also print the loaded configuration as JSON (with --dry-run)
    #[arg(short, long)]
    pub verbose: bool,

    /// Bazel binary to invoke
    #[arg(long, env = "BAZEL_BINARY", default_value = DEFAULT_PROGRAM)]
    pub bazel: String,
}

impl Cli {
    /// Execute the plugin
    pub fn execute(self) -> Result<()> {
        run_command(self.dry_run, self.verbose, &self.bazel)
    }
}
