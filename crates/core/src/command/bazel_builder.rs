//! Bazel argument assembly

use crate::{command::BazelCommand, config::PluginConfig};

/// Subcommand used when none is configured
pub const DEFAULT_COMMAND: &str = "run";

/// Key of the `--build_metadata` entry carrying the CI step name
pub const STEP_NAME_METADATA_KEY: &str = "STEP_NAME";

/// Builds the Bazel invocation for a plugin step
pub struct BazelCommandBuilder;

impl BazelCommandBuilder {
    /// Build the full command, ready to execute
    pub fn build(config: &PluginConfig, step_name: Option<&str>) -> BazelCommand {
        BazelCommand::new(Self::build_args(config, step_name))
    }

    /// Assemble the argument list.
    ///
    /// Order is fixed: startup flags, subcommand, build metadata, command
    /// flags, target, then `--` and the target's own flags. Flag strings are
    /// passed through as single arguments without any splitting.
    pub fn build_args(config: &PluginConfig, step_name: Option<&str>) -> Vec<String> {
        let mut args = Vec::new();

        if !config.bazelrc.is_empty() {
            args.push(join_flag("--bazelrc", &config.bazelrc));
        }

        let command = if config.command.is_empty() {
            DEFAULT_COMMAND
        } else {
            config.command.as_str()
        };
        args.push(command.to_string());

        if let Some(name) = step_name.filter(|name| !name.is_empty()) {
            args.push(join_flag(
                "--build_metadata",
                &format!("{STEP_NAME_METADATA_KEY}={name}"),
            ));
        }

        if !config.command_args.is_empty() {
            args.push(config.command_args.clone());
        }
        args.push(config.target.clone());

        if !config.target_args.is_empty() {
            args.push("--".to_string());
            args.push(config.target_args.clone());
        }

        tracing::debug!("Assembled bazel args: {:?}", args);
        args
    }
}

fn join_flag(flag: &str, value: &str) -> String {
    format!("{flag}={value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: &str) -> PluginConfig {
        PluginConfig {
            target: target.to_string(),
            registry: "0123456789.dkr.ecr.us-east-1.amazonaws.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_args() {
        let args = BazelCommandBuilder::build_args(&config("test"), None);
        assert_eq!(args, vec!["run", "test"]);
    }

    #[test]
    fn test_bazelrc_comes_first() {
        let config = PluginConfig {
            bazelrc: ".bazelrc.custom".to_string(),
            ..config("test")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(args, vec!["--bazelrc=.bazelrc.custom", "run", "test"]);
    }

    #[test]
    fn test_command_replaces_run() {
        let config = PluginConfig {
            bazelrc: ".bazelrc.custom".to_string(),
            command: "test".to_string(),
            ..config("test")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(args, vec!["--bazelrc=.bazelrc.custom", "test", "test"]);

        let config = PluginConfig {
            command: "build".to_string(),
            ..self::config("//app:image")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(args[0], "build");
    }

    #[test]
    fn test_command_args_precede_target() {
        let config = PluginConfig {
            bazelrc: ".bazelrc.custom".to_string(),
            command_args: "--config=test".to_string(),
            ..config("test")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(
            args,
            vec!["--bazelrc=.bazelrc.custom", "run", "--config=test", "test"]
        );
    }

    #[test]
    fn test_target_args_follow_separator() {
        let config = PluginConfig {
            bazelrc: ".bazelrc.custom".to_string(),
            target_args: "--var".to_string(),
            ..config("test")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(
            args,
            vec!["--bazelrc=.bazelrc.custom", "run", "test", "--", "--var"]
        );
    }

    #[test]
    fn test_step_name_adds_build_metadata() {
        let args = BazelCommandBuilder::build_args(&config("//app:push"), Some("publish"));
        assert_eq!(
            args,
            vec!["run", "--build_metadata=STEP_NAME=publish", "//app:push"]
        );
    }

    #[test]
    fn test_empty_step_name_is_ignored() {
        let args = BazelCommandBuilder::build_args(&config("//app:push"), Some(""));
        assert_eq!(args, vec!["run", "//app:push"]);
    }

    #[test]
    fn test_full_invocation() {
        let config = PluginConfig {
            bazelrc: ".bazelrc.ci".to_string(),
            command: "run".to_string(),
            command_args: "--config=release".to_string(),
            target_args: "--dst=latest".to_string(),
            ..config("//app:push")
        };

        let command = BazelCommandBuilder::build(&config, Some("push image"));

        insta::assert_snapshot!(
            command.to_shell_command(),
            @"bazel --bazelrc=.bazelrc.ci run '--build_metadata=STEP_NAME=push image' --config=release //app:push -- --dst=latest"
        );
    }

    #[test]
    fn test_malformed_flags_pass_through() {
        let config = PluginConfig {
            command_args: "--config ci --jobs=".to_string(),
            ..config("//app")
        };
        let args = BazelCommandBuilder::build_args(&config, None);
        assert_eq!(args, vec!["run", "--config ci --jobs=", "//app"]);
    }
}
