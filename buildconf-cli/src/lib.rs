//! Library exports for buildconf-cli.
//!
//! This module exports the CLI structure and the configure operation so the
//! binary stays a thin wrapper and integration tests can reach them.

pub mod cli;
pub mod configure;
pub mod error;

pub use cli::Cli;
pub use error::CliError;
