//! CLI structure and argument definitions.
//!
//! The configurator has no subcommands: it either reports the options of a
//! build directory or, when `-D` assignments are given, changes them.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// View and change the build options of a configured build directory.
#[derive(Parser, Debug)]
#[command(name = "buildconf")]
#[command(version, about = "View and change build options", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long)]
    pub quiet: bool,

    /// Set an option, e.g. -D buildtype=release (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub sets: Vec<String>,

    /// Build directory (defaults to the current directory)
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,
}

impl Cli {
    /// Returns `true` if any assignment was requested.
    #[must_use]
    pub fn has_assignments(&self) -> bool {
        !self.sets.is_empty()
    }
}
