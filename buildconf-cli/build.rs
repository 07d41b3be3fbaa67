//! Build script for buildconf-cli.
//!
//! This script generates the buildconf.1 man page at build time using
//! clap_mangen. The page is placed in OUT_DIR/man.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("buildconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("View and change build options")
        .long_about(
            "Show the build options of a configured build directory, or change them with \
             -D KEY=VALUE assignments. If you omit the build directory, the current \
             directory is substituted.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sets")
                .short('D')
                .value_name("KEY=VALUE")
                .help("Set an option, e.g. -D buildtype=release (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("directories")
                .value_name("DIRECTORY")
                .help("Build directory (defaults to the current directory)")
                .action(ArgAction::Append),
        )
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();
    fs::write(man_dir.join("buildconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
}
