//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and adds the failures that only exist
//! at the command line.

use std::fmt;

use buildconf::Error as LibError;

/// Usage text printed when the positional arguments are wrong.
pub const USAGE: &str = "buildconf <build directory>\n\
                         If you omit the build directory, the current directory is substituted.";

/// Line printed before any configuration error.
pub const ERROR_LEAD_IN: &str = "The configurator encountered an error:";

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// More than one build directory was given.
    Usage,

    /// I/O error.
    Io(std::io::Error),
}

impl CliError {
    /// Get the exit code for this error.
    ///
    /// Every failure exits with status 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(_) | CliError::Usage | CliError::Io(_) => 1,
        }
    }

    /// Text to print on stderr for this error.
    ///
    /// Usage errors print the usage text alone; everything else is
    /// introduced by [`ERROR_LEAD_IN`] and a blank line.
    pub fn report(&self) -> String {
        match self {
            CliError::Usage => self.to_string(),
            _ => format!("{ERROR_LEAD_IN}\n\n{self}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Usage => write!(f, "{USAGE}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Usage => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
