//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for configured build directories.

use std::path::{Path, PathBuf};

use buildconf::{BuildDescription, OptionStore, SnapshotStore, UserOption};
use tempfile::TempDir;

/// Builder for a configured build directory inside a temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
#[allow(dead_code)]
pub struct ConfiguredDirFixture {
    store: OptionStore,
    languages: Vec<String>,
}

#[allow(dead_code)]
impl ConfiguredDirFixture {
    /// Starts from builtin defaults, no languages and no project options.
    pub fn new() -> Self {
        Self {
            store: OptionStore::new(),
            languages: Vec::new(),
        }
    }

    /// Registers a language with empty argument lists.
    pub fn with_language(mut self, language: &str) -> Self {
        self.languages.push(language.to_string());
        self
    }

    /// Declares a project option.
    pub fn with_user_option(mut self, option: UserOption) -> Self {
        self.store.add_user_option(option);
        self
    }

    /// Declares a compiler option.
    pub fn with_compiler_option(mut self, option: UserOption) -> Self {
        self.store.add_compiler_option(option);
        self
    }

    /// Writes both snapshots and returns the temporary build directory.
    pub fn build(mut self) -> TempDir {
        for language in &self.languages {
            self.store.register_language(language.as_str());
        }
        let dir = tempfile::tempdir().unwrap();
        let description = BuildDescription::new("/src/project", dir.path());
        SnapshotStore::initialize(dir.path(), self.store, description).unwrap();
        dir
    }
}

/// Path of the option snapshot of a build directory.
#[allow(dead_code)]
pub fn options_file(build_dir: &Path) -> PathBuf {
    SnapshotStore::options_path(build_dir)
}

/// Path of the build description of a build directory.
#[allow(dead_code)]
pub fn build_file(build_dir: &Path) -> PathBuf {
    SnapshotStore::build_path(build_dir)
}
