//! The configurator's single operation.
//!
//! Loads the snapshot of a build directory, then either applies the `-D`
//! assignments and persists the result, or prints the option report.

use std::io::Write;
use std::path::PathBuf;

use buildconf::{Logger, Reporter, SnapshotStore};

use crate::cli::Cli;
use crate::error::CliError;

/// Resolves the build directory from the positional arguments.
///
/// # Errors
///
/// Returns `CliError::Usage` if more than one directory was given, or an
/// I/O error if the current directory cannot be determined.
pub fn resolve_build_dir(directories: &[PathBuf]) -> Result<PathBuf, CliError> {
    match directories {
        [] => Ok(std::env::current_dir()?),
        [directory] => Ok(directory.clone()),
        _ => Err(CliError::Usage),
    }
}

/// Runs the configurator, writing the report (if any) to `out`.
///
/// The snapshot is saved only after every assignment succeeded; a failing
/// assignment leaves the persisted configuration as it was.
///
/// # Errors
///
/// Returns an error if the directory is not a usable build directory, an
/// assignment is rejected, or writing fails.
pub fn execute(cli: &Cli, logger: &Logger, out: &mut impl Write) -> Result<(), CliError> {
    let build_dir = resolve_build_dir(&cli.directories)?;
    let mut snapshot = SnapshotStore::load(&build_dir)?;
    logger.debug(&format!(
        "Loaded configuration of {}",
        snapshot.build_dir().display()
    ));

    if cli.has_assignments() {
        snapshot.store_mut().assign_batch(cli.sets.as_slice())?;
        snapshot.save()?;
        logger.info(&format!(
            "Applied {} option change(s) to {}",
            cli.sets.len(),
            build_dir.display()
        ));
    } else {
        Reporter::from_snapshot(&snapshot).write_to(out)?;
    }
    Ok(())
}
