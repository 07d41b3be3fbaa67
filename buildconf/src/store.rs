//! The option store.
//!
//! The store holds every option a build directory knows about, split into
//! partitions that are searched in a fixed order:
//!
//! 1. builtin options (fixed names, see [`crate::builtins`])
//! 2. project options declared by the project
//! 3. compiler options declared by the detected toolchains
//! 4. per-language argument lists, addressed as `<lang>args` and
//!    `<lang>linkargs`
//!
//! # Examples
//!
//! ```
//! use buildconf::OptionStore;
//!
//! let mut store = OptionStore::new();
//! store.register_language("c");
//!
//! store.assign_batch(&["werror=true", "cargs=-O2 -g"]).unwrap();
//! assert_eq!(store.get("werror").unwrap().render(), "true");
//! assert_eq!(store.compile_args("c").unwrap(), ["-O2", "-g"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builtins;
use crate::error::{Error, Result};
use crate::option::{RawValue, UserOption};

const LINK_ARGS_SUFFIX: &str = "linkargs";
const COMPILE_ARGS_SUFFIX: &str = "args";

/// All options of one build directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStore {
    #[serde(default)]
    builtins: BTreeMap<String, UserOption>,
    #[serde(default)]
    user_options: BTreeMap<String, UserOption>,
    #[serde(default)]
    compiler_options: BTreeMap<String, UserOption>,
    #[serde(default)]
    compile_args: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    link_args: BTreeMap<String, Vec<String>>,
}

impl Default for OptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionStore {
    /// Creates a store with every builtin at its default and no other options.
    #[must_use]
    pub fn new() -> Self {
        let builtins = builtins::default_options()
            .into_iter()
            .map(|opt| (opt.name().to_string(), opt))
            .collect();
        Self {
            builtins,
            user_options: BTreeMap::new(),
            compiler_options: BTreeMap::new(),
            compile_args: BTreeMap::new(),
            link_args: BTreeMap::new(),
        }
    }

    /// Restores the fixed builtin declarations after loading from disk.
    ///
    /// Names that are not builtins are dropped. A builtin that is missing, or
    /// whose kind or choices differ from the tool's own declaration, comes
    /// back at its default.
    pub(crate) fn normalize_builtins(&mut self) {
        self.builtins.retain(|name, _| {
            let keep = builtins::is_builtin(name);
            if !keep {
                log::debug!("Dropping unknown builtin option {name}");
            }
            keep
        });
        for default in builtins::default_options() {
            let matches = self
                .builtins
                .get(default.name())
                .is_some_and(|loaded| loaded.variant().same_declaration(default.variant()));
            if !matches {
                log::debug!("Restoring builtin option {} to its default", default.name());
                self.builtins.insert(default.name().to_string(), default);
            }
        }
    }

    /// Looks up an option by name across the builtin, project and compiler
    /// partitions, in that order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UserOption> {
        self.builtins
            .get(name)
            .or_else(|| self.user_options.get(name))
            .or_else(|| self.compiler_options.get(name))
    }

    /// Looks up a builtin option.
    #[must_use]
    pub fn builtin(&self, name: &str) -> Option<&UserOption> {
        self.builtins.get(name)
    }

    /// Iterates over project options sorted by name.
    pub fn user_options(&self) -> impl Iterator<Item = &UserOption> {
        self.user_options.values()
    }

    /// Iterates over compiler options sorted by name.
    pub fn compiler_options(&self) -> impl Iterator<Item = &UserOption> {
        self.compiler_options.values()
    }

    /// Iterates over `(language, compile arguments)` sorted by language.
    pub fn all_compile_args(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.compile_args
            .iter()
            .map(|(lang, args)| (lang.as_str(), args.as_slice()))
    }

    /// Iterates over `(language, link arguments)` sorted by language.
    pub fn all_link_args(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.link_args
            .iter()
            .map(|(lang, args)| (lang.as_str(), args.as_slice()))
    }

    /// Returns the compile arguments of a registered language.
    #[must_use]
    pub fn compile_args(&self, language: &str) -> Option<&[String]> {
        self.compile_args.get(language).map(Vec::as_slice)
    }

    /// Returns the link arguments of a registered language.
    #[must_use]
    pub fn link_args(&self, language: &str) -> Option<&[String]> {
        self.link_args.get(language).map(Vec::as_slice)
    }

    /// Adds or replaces a project option.
    pub fn add_user_option(&mut self, option: UserOption) {
        self.user_options.insert(option.name().to_string(), option);
    }

    /// Adds or replaces a compiler option.
    pub fn add_compiler_option(&mut self, option: UserOption) {
        self.compiler_options.insert(option.name().to_string(), option);
    }

    /// Registers a language with empty compile and link argument lists.
    ///
    /// Registering an already known language keeps its current lists.
    pub fn register_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        self.link_args.entry(language.clone()).or_default();
        self.compile_args.entry(language).or_default();
    }

    /// Assigns a raw value to the option or argument list named by `name`.
    ///
    /// Builtins are tried first, then project options, then compiler
    /// options. A name ending in `linkargs` or `args` whose prefix is a
    /// registered language replaces that language's link or compile argument
    /// list with the whitespace-separated words of the value. Quoting is not
    /// supported, so an argument can never contain a space.
    ///
    /// # Errors
    ///
    /// Returns the option's validation error, `InvalidPath` for an install
    /// directory on the wrong side of the prefix, `UnknownLanguage` for an
    /// argument key of an unregistered language and `UnknownOption` if nothing
    /// matches.
    pub fn assign(&mut self, name: &str, raw: &RawValue) -> Result<()> {
        if let Some(option) = self.builtins.get_mut(name) {
            if let Some(rule) = builtins::path_rule(name) {
                let candidate = option.validate(raw)?.render();
                rule.check(name, &candidate)?;
            }
            return option.set(raw);
        }

        if let Some(option) = self.user_options.get_mut(name) {
            return option.set(raw);
        }

        if let Some(option) = self.compiler_options.get_mut(name) {
            return option.set(raw);
        }

        if let Some(language) = name.strip_suffix(LINK_ARGS_SUFFIX) {
            let args = split_arguments(name, raw)?;
            let slot = self
                .link_args
                .get_mut(language)
                .ok_or_else(|| Error::UnknownLanguage {
                    language: language.to_string(),
                    kind: "linkargs",
                })?;
            *slot = args;
            return Ok(());
        }

        if let Some(language) = name.strip_suffix(COMPILE_ARGS_SUFFIX) {
            let args = split_arguments(name, raw)?;
            let slot = self
                .compile_args
                .get_mut(language)
                .ok_or_else(|| Error::UnknownLanguage {
                    language: language.to_string(),
                    kind: "compile args",
                })?;
            *slot = args;
            return Ok(());
        }

        Err(Error::UnknownOption {
            name: name.to_string(),
        })
    }

    /// Applies a batch of `key=value` assignments in order.
    ///
    /// The first failing entry stops the batch. Assignments applied before it
    /// stay in the store; callers persist the store only when the whole batch
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns `MalformedAssignment` for an entry without `=`, or the error of
    /// the first failing [`OptionStore::assign`].
    pub fn assign_batch<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<()> {
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| Error::MalformedAssignment {
                    entry: entry.to_string(),
                })?;
            log::debug!("Assigning {key} = {value}");
            self.assign(key, &RawValue::from(value))?;
        }
        Ok(())
    }
}

/// Turns a raw value into an argument list.
fn split_arguments(name: &str, raw: &RawValue) -> Result<Vec<String>> {
    match raw {
        RawValue::Text(text) => Ok(text.split_whitespace().map(str::to_string).collect()),
        RawValue::List(items) => items
            .iter()
            .map(|item| match item {
                RawValue::Text(text) => Ok(text.clone()),
                other => Err(Error::NonStringElement {
                    option: name.to_string(),
                    element: other.to_string(),
                }),
            })
            .collect(),
        RawValue::Boolean(_) => Err(Error::MalformedArray {
            option: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
