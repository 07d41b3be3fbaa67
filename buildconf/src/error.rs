//! Error types for the buildconf library.
//!
//! This module provides the error hierarchy for every operation in the
//! library: option validation, store assignment, snapshot persistence and
//! template rendering. It uses `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a buildconf error.
///
/// # Examples
///
/// ```
/// use buildconf::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the buildconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// The directory does not contain a persisted configuration.
    #[error("directory {} does not seem to be a configured build directory", path.display())]
    NotAConfiguredDirectory {
        /// The directory that was inspected.
        path: PathBuf,
    },

    /// The persisted snapshot was written by a different tool version.
    #[error("version mismatch ({expected} vs {found})")]
    VersionMismatch {
        /// The version of the running tool.
        expected: String,
        /// The version recorded in the snapshot.
        found: String,
    },

    /// An assignment string was not of the form `key=value`.
    #[error("value \"{entry}\" not of type \"a=b\"")]
    MalformedAssignment {
        /// The offending assignment string.
        entry: String,
    },

    /// No option, builtin or argument key matches the name.
    #[error("unknown option {name}")]
    UnknownOption {
        /// The requested option name.
        name: String,
    },

    /// An argument key referenced a language with no registered toolchain.
    #[error("unknown language {language} in {kind}")]
    UnknownLanguage {
        /// The language prefix extracted from the key.
        language: String,
        /// Which argument list was addressed (`compile args` or `linkargs`).
        kind: &'static str,
    },

    /// A boolean option received something other than `true` or `false`.
    #[error("value {value} for option \"{option}\" is not boolean (true or false)")]
    InvalidBoolean {
        /// The option being assigned.
        option: String,
        /// The rejected value.
        value: String,
    },

    /// A combo option received a value outside its choice set.
    #[error(
        "value \"{value}\" for combo option \"{option}\" is not one of the choices; possible choices are: {choices}"
    )]
    InvalidChoice {
        /// The option being assigned.
        option: String,
        /// The rejected value.
        value: String,
        /// All choices, quoted and comma-joined in declaration order.
        choices: String,
    },

    /// A string array option received text that is not a list literal.
    #[error("value for option \"{option}\" does not define an array: {value}")]
    MalformedArray {
        /// The option being assigned.
        option: String,
        /// The rejected value.
        value: String,
    },

    /// A string array contained an element that is not a string.
    #[error("string array element for option \"{option}\" is not a string: {element}")]
    NonStringElement {
        /// The option being assigned.
        option: String,
        /// The offending element as written.
        element: String,
    },

    /// A string option received a non-textual value.
    #[error("value {value} for string option \"{option}\" is not a string")]
    InvalidString {
        /// The option being assigned.
        option: String,
        /// The rejected value.
        value: String,
    },

    /// An install directory violated its absolute/relative rule.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An option could not be declared with the given settings.
    #[error("invalid declaration for option \"{option}\": {reason}")]
    InvalidDeclaration {
        /// The option being declared.
        option: String,
        /// Why the declaration was rejected.
        reason: String,
    },

    /// A directive line did not have exactly two tokens.
    #[error("{marker} does not contain exactly two tokens: {line}")]
    MalformedDirective {
        /// The directive marker in use.
        marker: String,
        /// The offending line, trimmed.
        line: String,
    },

    /// A directive referenced a value that cannot become a macro.
    #[error("{marker} argument \"{name}\" is of unknown type")]
    UnsupportedDefineType {
        /// The directive marker in use.
        marker: String,
        /// The referenced identifier.
        name: String,
    },

    /// A placeholder referenced a value that is neither string nor integer.
    #[error("tried to replace variable \"{name}\" with something other than a string or int")]
    UnsupportedSubstitutionType {
        /// The referenced identifier.
        name: String,
    },

    /// A placeholder came back while its own value was being expanded.
    #[error("variable \"{name}\" is expanded recursively")]
    RecursiveSubstitution {
        /// The identifier expanded twice on one line.
        name: String,
    },

    /// A configuration mapping could not be parsed.
    #[error("invalid {format} configuration data: {message}")]
    InvalidData {
        /// The input format (`yaml` or `json`).
        format: &'static str,
        /// The parser's message.
        message: String,
    },

    /// A snapshot file could not be parsed or serialized.
    #[error("snapshot error in {}: {source}", path.display())]
    Snapshot {
        /// The snapshot file involved.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error was raised while validating a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use buildconf::Error;
    ///
    /// let err = Error::InvalidBoolean {
    ///     option: "werror".to_string(),
    ///     value: "maybe".to_string(),
    /// };
    /// assert!(err.is_validation_error());
    /// ```
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBoolean { .. }
                | Self::InvalidChoice { .. }
                | Self::MalformedArray { .. }
                | Self::NonStringElement { .. }
                | Self::InvalidString { .. }
                | Self::InvalidPath { .. }
        )
    }

    /// Check if the error means the build directory cannot be used at all.
    #[must_use]
    pub fn is_unusable_directory(&self) -> bool {
        matches!(
            self,
            Self::NotAConfiguredDirectory { .. } | Self::VersionMismatch { .. }
        )
    }
}
