//! The fixed set of builtin options.
//!
//! Builtin options have names and semantics defined by the tool itself. The
//! install directories carry an extra path rule on top of their string
//! variant: the prefix must be absolute, everything below it relative.

use std::path::Path;

use crate::error::{Error, Result};
use crate::option::{OptionVariant, UserOption};

/// Allowed build types, in display order.
pub const BUILD_TYPES: [&str; 5] = ["plain", "debug", "debugoptimized", "release", "minsize"];

/// Allowed warning levels.
pub const WARNING_LEVELS: [&str; 3] = ["1", "2", "3"];

/// Allowed default library kinds.
pub const LIBRARY_TYPES: [&str; 2] = ["shared", "static"];

/// Builtins shown in the core options table, in display order.
pub const CORE_OPTIONS: [&str; 8] = [
    "buildtype",
    "warning_level",
    "werror",
    "strip",
    "coverage",
    "use_pch",
    "unity",
    "default_library",
];

/// Builtins shown in the directories table, in display order.
pub const DIRECTORY_OPTIONS: [&str; 7] = [
    "prefix",
    "libdir",
    "bindir",
    "includedir",
    "datadir",
    "mandir",
    "localedir",
];

/// Extra constraint applied to install directory builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRule {
    /// The value must be an absolute path.
    Absolute,
    /// The value must be a relative path (resolved against the prefix).
    Relative,
}

impl PathRule {
    /// Checks a candidate value against the rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` naming the option if the rule is violated.
    pub fn check(self, option: &str, value: &str) -> Result<()> {
        let path = Path::new(value);
        match self {
            Self::Absolute if !path.is_absolute() => Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("{option} must be an absolute path"),
            }),
            Self::Relative if path.is_absolute() => Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("{option} must not be an absolute path"),
            }),
            _ => Ok(()),
        }
    }
}

/// Returns the path rule for a builtin, if it has one.
#[must_use]
pub fn path_rule(name: &str) -> Option<PathRule> {
    match name {
        "prefix" => Some(PathRule::Absolute),
        "libdir" | "bindir" | "includedir" | "datadir" | "mandir" | "localedir" => {
            Some(PathRule::Relative)
        }
        _ => None,
    }
}

/// Returns `true` if `name` is one of the builtin options.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    CORE_OPTIONS.contains(&name) || DIRECTORY_OPTIONS.contains(&name)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn combo(name: &str, description: &str, choices: &[&str], value: &str) -> UserOption {
    UserOption::trusted(
        name,
        description,
        OptionVariant::Combo {
            value: value.to_string(),
            choices: owned(choices),
        },
    )
}

/// Builds every builtin option at its default value.
///
/// # Examples
///
/// ```
/// use buildconf::builtins::default_options;
///
/// let defaults = default_options();
/// assert_eq!(defaults.len(), 15);
/// assert_eq!(defaults[0].name(), "buildtype");
/// assert_eq!(defaults[0].render(), "debug");
/// ```
#[must_use]
pub fn default_options() -> Vec<UserOption> {
    vec![
        combo("buildtype", "Build type", &BUILD_TYPES, "debug"),
        combo("warning_level", "Warning level", &WARNING_LEVELS, "1"),
        UserOption::boolean("werror", "Treat warnings as errors", false),
        UserOption::boolean("strip", "Strip on install", false),
        UserOption::boolean("coverage", "Coverage report", false),
        UserOption::boolean("use_pch", "Precompiled headers", true),
        UserOption::boolean("unity", "Unity build", false),
        combo(
            "default_library",
            "Default library type",
            &LIBRARY_TYPES,
            "shared",
        ),
        UserOption::string("prefix", "Install prefix", default_prefix()),
        UserOption::string("libdir", "Library directory", "lib"),
        UserOption::string("bindir", "Binary directory", "bin"),
        UserOption::string("includedir", "Header directory", "include"),
        UserOption::string("datadir", "Data directory", "share"),
        UserOption::string("mandir", "Man page directory", "share/man"),
        UserOption::string("localedir", "Locale file directory", "share/locale"),
    ]
}

#[cfg(windows)]
fn default_prefix() -> &'static str {
    "c:/"
}

#[cfg(not(windows))]
fn default_prefix() -> &'static str {
    "/usr/local"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_builtin() {
        let defaults = default_options();
        let names: Vec<&str> = defaults.iter().map(UserOption::name).collect();
        let expected: Vec<&str> = CORE_OPTIONS
            .iter()
            .chain(DIRECTORY_OPTIONS.iter())
            .copied()
            .collect();
        assert_eq!(names, expected);
        assert!(names.iter().all(|n| is_builtin(n)));
    }

    #[test]
    fn test_default_combos_are_valid() {
        for option in default_options() {
            UserOption::new(option.name(), option.description(), option.variant().clone())
                .unwrap();
        }
    }

    #[test]
    fn test_default_directories_satisfy_rules() {
        for option in default_options() {
            if let Some(rule) = path_rule(option.name()) {
                rule.check(option.name(), &option.render()).unwrap();
            }
        }
    }

    #[test]
    fn test_path_rules() {
        assert_eq!(path_rule("prefix"), Some(PathRule::Absolute));
        assert_eq!(path_rule("mandir"), Some(PathRule::Relative));
        assert_eq!(path_rule("werror"), None);

        assert!(PathRule::Relative.check("libdir", "lib64").is_ok());
        let err = PathRule::Relative.check("libdir", "/usr/lib").unwrap_err();
        assert!(format!("{err}").contains("libdir must not be an absolute path"));

        let err = PathRule::Absolute.check("prefix", "usr").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("werror"));
        assert!(is_builtin("localedir"));
        assert!(!is_builtin("cargs"));
        assert!(!is_builtin("layout"));
    }
}
