//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary build directories
//! - Command builder helpers

use assert_cmd::Command;
use buildconf::{BuildDescription, OptionStore, SnapshotStore, UserOption};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated build directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the build directory (configured by `configure`)
    pub build_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The build directory path is reserved but not configured yet.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let build_dir = temp_path.join("build");

        Self {
            temp_dir,
            temp_path,
            build_dir,
        }
    }

    /// Create a test environment whose build directory is configured with
    /// builtin defaults, a `c` language and one project option.
    pub fn configured() -> Self {
        let env = Self::new();
        let mut store = OptionStore::new();
        store.register_language("c");
        store.add_user_option(UserOption::boolean("with_docs", "Build documentation", false));
        env.configure(store);
        env
    }

    /// Write both snapshots for the given store into the build directory.
    pub fn configure(&self, store: OptionStore) {
        let description = BuildDescription::new(self.temp_path.join("src"), &self.build_dir);
        SnapshotStore::initialize(&self.build_dir, store, description)
            .expect("Failed to configure build directory");
    }

    /// Get a command builder for the buildconf binary.
    ///
    /// The log mode variable is cleared so the caller's environment cannot
    /// change the output.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("buildconf").expect("Failed to find buildconf binary");
        cmd.env_remove("BUILDCONF_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the option snapshot.
    pub fn options_file(&self) -> PathBuf {
        SnapshotStore::options_path(&self.build_dir)
    }

    /// Load the persisted configuration of the build directory.
    pub fn load(&self) -> SnapshotStore {
        SnapshotStore::load(&self.build_dir).expect("Failed to load snapshot")
    }
}
