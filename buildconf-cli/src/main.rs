//! Main entry point for the buildconf CLI.
//!
//! Shows the build options of a configured build directory, or changes them
//! with `-D KEY=VALUE` assignments.

use buildconf_cli::{configure, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let logger = buildconf::init_logger(cli.verbose, cli.quiet);

    let result = configure::execute(&cli, &logger, &mut std::io::stdout().lock());

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", e.report());
            std::process::exit(e.exit_code());
        }
    }
}
