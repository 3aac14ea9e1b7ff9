use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use bazelisk_ecr_core::{
    EcrClient, Error, PluginRunner, ProcessEnv,
    config::env::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY},
};

pub fn run_command(dry_run: bool, verbose: bool, bazel: &str) -> Result<()> {
    let runner =
        PluginRunner::from_env(&ProcessEnv).context("Failed to load plugin configuration")?;
    let command = runner.command().with_program(bazel);
    let shell_cmd = command.to_shell_command();

    if dry_run {
        return print_plan(&runner, &shell_cmd, verbose);
    }

    // Must happen before any thread is spawned
    runner.publish_env(&mut ProcessEnv);

    if runner.should_provision() {
        provision(&runner)?;
    }

    info!("Running: {}", shell_cmd);
    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {}", shell_cmd))?;

    if !status.success() {
        debug!("{} exited with {}", command.program, status);
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}

fn provision(runner: &PluginRunner) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(async {
            let client = EcrClient::from_config(runner.config()).await?;
            runner.provision(&client).await
        })
        .with_context(|| {
            format!(
                "Failed to provision repository {}",
                runner.config().repository
            )
        })
}

fn print_plan(runner: &PluginRunner, shell_cmd: &str, verbose: bool) -> Result<()> {
    let config = runner.config();

    if verbose {
        println!("{}", config.to_json()?);
    }

    println!("{}", shell_cmd);

    let mut exported = BTreeMap::<String, String>::new();
    runner.publish_env(&mut exported);
    if !exported.is_empty() {
        println!("Environment variables:");
        for (key, value) in &exported {
            if key == AWS_ACCESS_KEY_ID || key == AWS_SECRET_ACCESS_KEY {
                println!("  {}=<redacted>", key);
            } else {
                println!("  {}={}", key, value);
            }
        }
    }

    if runner.should_provision() {
        let region = config.region()?;
        if config.repository.is_empty() {
            return Err(Error::MissingRepository.into());
        }
        println!(
            "Would ensure repository {} exists in {} ({})",
            config.repository, config.registry, region
        );
    }

    Ok(())
}
