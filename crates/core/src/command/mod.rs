//! Bazel command generation and execution

pub mod bazel_builder;
pub mod bazel_command;

// Re-export commonly used types
pub use bazel_builder::BazelCommandBuilder;
pub use bazel_command::BazelCommand;
