//! Persisted configuration snapshots.
//!
//! A configured build directory contains a private subdirectory with two
//! YAML documents:
//!
//! - `options.yaml`, the option snapshot, owned by this module
//! - `build.yaml`, the build description, owned by the build-graph generator
//!
//! Both carry a top-level `version` key. The option snapshot must have been
//! written by the same tool version that reads it; there is no upgrade path.
//!
//! # Examples
//!
//! ```
//! use buildconf::{BuildDescription, OptionStore, SnapshotStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let description = BuildDescription::new("/src/project", dir.path());
//! SnapshotStore::initialize(dir.path(), OptionStore::new(), description).unwrap();
//!
//! let mut snapshot = SnapshotStore::load(dir.path()).unwrap();
//! snapshot.store_mut().assign_batch(&["unity=true"]).unwrap();
//! snapshot.save().unwrap();
//!
//! let reloaded = SnapshotStore::load(dir.path()).unwrap();
//! assert_eq!(reloaded.store().get("unity").unwrap().render(), "true");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::OptionStore;

/// Version of the running tool, recorded in every snapshot it writes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the private subdirectory inside a build directory.
pub const PRIVATE_DIR: &str = "buildconf-private";

/// File name of the option snapshot.
pub const OPTIONS_FILE: &str = "options.yaml";

/// File name of the build description snapshot.
pub const BUILD_FILE: &str = "build.yaml";

/// Paths of the environment the build directory was configured for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    /// Root of the source tree.
    pub source_dir: PathBuf,
    /// Root of the build tree.
    pub build_dir: PathBuf,
    /// Fields owned by the build-graph generator.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// The build description snapshot.
///
/// Only the environment paths are interpreted here; everything else is kept
/// as opaque YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildDescription {
    /// Version of the tool that generated the description.
    pub version: String,
    /// Source and build paths.
    pub environment: BuildEnvironment,
    /// Fields owned by the build-graph generator.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl BuildDescription {
    /// Creates a description for the running tool version.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            version: VERSION.to_string(),
            environment: BuildEnvironment {
                source_dir: source_dir.into(),
                build_dir: build_dir.into(),
                extra: BTreeMap::new(),
            },
            extra: BTreeMap::new(),
        }
    }
}

/// Only the version header of the option snapshot.
#[derive(Deserialize)]
struct SnapshotHeader {
    version: String,
}

#[derive(Deserialize)]
struct OptionSnapshot {
    options: OptionStore,
}

#[derive(Serialize)]
struct OptionSnapshotRef<'a> {
    version: &'a str,
    options: &'a OptionStore,
}

/// The loaded configuration of one build directory.
#[derive(Debug)]
pub struct SnapshotStore {
    build_dir: PathBuf,
    store: OptionStore,
    build: BuildDescription,
}

impl SnapshotStore {
    /// Returns the path of the option snapshot inside `build_dir`.
    #[must_use]
    pub fn options_path(build_dir: &Path) -> PathBuf {
        build_dir.join(PRIVATE_DIR).join(OPTIONS_FILE)
    }

    /// Returns the path of the build description inside `build_dir`.
    #[must_use]
    pub fn build_path(build_dir: &Path) -> PathBuf {
        build_dir.join(PRIVATE_DIR).join(BUILD_FILE)
    }

    /// Loads the snapshots of a configured build directory.
    ///
    /// # Errors
    ///
    /// Returns `NotAConfiguredDirectory` if either snapshot file is missing,
    /// `VersionMismatch` if the option snapshot was written by another tool
    /// version, and `Snapshot` if a file is not valid YAML of the expected
    /// shape.
    pub fn load(directory: &Path) -> Result<Self> {
        let options_path = Self::options_path(directory);
        let build_path = Self::build_path(directory);
        if !options_path.is_file() || !build_path.is_file() {
            return Err(Error::NotAConfiguredDirectory {
                path: directory.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(&options_path)?;
        let header: SnapshotHeader = parse_yaml(&options_path, &contents)?;
        if header.version != VERSION {
            return Err(Error::VersionMismatch {
                expected: VERSION.to_string(),
                found: header.version,
            });
        }
        let snapshot: OptionSnapshot = parse_yaml(&options_path, &contents)?;
        let mut store = snapshot.options;
        store.normalize_builtins();

        let build_contents = fs::read_to_string(&build_path)?;
        let build: BuildDescription = parse_yaml(&build_path, &build_contents)?;

        log::debug!("Loaded configuration from {}", directory.display());
        Ok(Self {
            build_dir: directory.to_path_buf(),
            store,
            build,
        })
    }

    /// Creates the private directory and writes both snapshots.
    ///
    /// This is the first-configure step performed by the configure command;
    /// the configurator itself only ever loads and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written.
    pub fn initialize(
        directory: &Path,
        store: OptionStore,
        build: BuildDescription,
    ) -> Result<Self> {
        fs::create_dir_all(directory.join(PRIVATE_DIR))?;
        let build_path = Self::build_path(directory);
        let yaml = serde_yaml::to_string(&build).map_err(|source| Error::Snapshot {
            path: build_path.clone(),
            source,
        })?;
        fs::write(&build_path, yaml)?;

        let snapshot = Self {
            build_dir: directory.to_path_buf(),
            store,
            build,
        };
        snapshot.save()?;
        Ok(snapshot)
    }

    /// Overwrites the option snapshot with the current store.
    ///
    /// The build description is never written: it belongs to the build-graph
    /// generator, which regenerates it on its next run.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::options_path(&self.build_dir);
        let snapshot = OptionSnapshotRef {
            version: VERSION,
            options: &self.store,
        };
        let yaml = serde_yaml::to_string(&snapshot).map_err(|source| Error::Snapshot {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, yaml)?;
        log::debug!("Saved option snapshot to {}", path.display());
        Ok(())
    }

    /// Returns the build directory this snapshot was loaded from.
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the option store.
    #[must_use]
    pub const fn store(&self) -> &OptionStore {
        &self.store
    }

    /// Returns the option store for assignment.
    pub fn store_mut(&mut self) -> &mut OptionStore {
        &mut self.store
    }

    /// Returns the build description.
    #[must_use]
    pub const fn build_description(&self) -> &BuildDescription {
        &self.build
    }
}

fn parse_yaml<T: for<'de> Deserialize<'de>>(path: &Path, contents: &str) -> Result<T> {
    serde_yaml::from_str(contents).map_err(|source| Error::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}
