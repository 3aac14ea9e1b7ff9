use std::process::{Command, ExitStatus};

use crate::error::Result;

/// Program invoked when no other build binary is configured; bazelisk
/// installs itself under this name
pub const DEFAULT_PROGRAM: &str = "bazel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazelCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BazelCommand {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Human-readable command line, quoting arguments that contain spaces
    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.is_empty() || arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    /// Run the command to completion with inherited stdio and environment
    pub fn execute(&self) -> Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        Ok(cmd.status()?)
    }
}
