//! Integration tests for the load, assign, save cycle of a build directory.
//!
//! These tests drive the library the way the configurator command does:
//! load the snapshot, apply a batch of assignments, persist only when the
//! whole batch succeeded, or render the report.

mod common;

use std::fs;

use buildconf::{Error, OptionValue, Reporter, SnapshotStore, UserOption};
use common::{build_file, options_file, ConfiguredDirFixture};

// =============================================================================
// Assignment and persistence
// =============================================================================

#[test]
fn test_batch_persists_across_loads() {
    let dir = ConfiguredDirFixture::new()
        .with_language("c")
        .with_user_option(UserOption::string_array("features", "Enabled features", vec![]))
        .build();

    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();
    snapshot
        .store_mut()
        .assign_batch(&[
            "werror=true",
            "buildtype=release",
            "prefix=/opt/tool",
            "cargs=-O2 -g",
            "clinkargs=-lm",
            "features=['gl', 'vulkan']",
        ])
        .unwrap();
    snapshot.save().unwrap();

    let reloaded = SnapshotStore::load(dir.path()).unwrap();
    let store = reloaded.store();
    assert_eq!(store.get("werror").unwrap().value(), OptionValue::Boolean(true));
    assert_eq!(store.get("buildtype").unwrap().render(), "release");
    assert_eq!(store.get("prefix").unwrap().render(), "/opt/tool");
    assert_eq!(store.compile_args("c").unwrap(), ["-O2", "-g"]);
    assert_eq!(store.link_args("c").unwrap(), ["-lm"]);
    assert_eq!(
        store.get("features").unwrap().value(),
        OptionValue::StringArray(vec!["gl".to_string(), "vulkan".to_string()])
    );
}

#[test]
fn test_failed_batch_is_not_persisted() {
    let dir = ConfiguredDirFixture::new().build();
    let before = fs::read(options_file(dir.path())).unwrap();

    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();
    let err = snapshot
        .store_mut()
        .assign_batch(&["werror=true", "buildtype=turbo", "strip=true"])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidChoice { .. }));

    // the first entry was applied in memory, the third never ran
    assert_eq!(snapshot.store().get("werror").unwrap().render(), "true");
    assert_eq!(snapshot.store().get("strip").unwrap().render(), "false");

    drop(snapshot);
    assert_eq!(fs::read(options_file(dir.path())).unwrap(), before);
    let reloaded = SnapshotStore::load(dir.path()).unwrap();
    assert_eq!(reloaded.store().get("werror").unwrap().render(), "false");
}

#[test]
fn test_malformed_entry_fails_before_mutation() {
    let dir = ConfiguredDirFixture::new().build();
    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();
    let err = snapshot.store_mut().assign_batch(&["bogus"]).unwrap_err();
    assert_eq!(format!("{err}"), "value \"bogus\" not of type \"a=b\"");
}

#[test]
fn test_unknown_language_and_option() {
    let dir = ConfiguredDirFixture::new().with_language("c").build();
    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();

    let err = snapshot
        .store_mut()
        .assign_batch(&["ghostlang_args=-O2"])
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLanguage { .. }));

    let err = snapshot.store_mut().assign_batch(&["layout=flat"]).unwrap_err();
    assert!(matches!(err, Error::UnknownOption { ref name } if name == "layout"));
}

#[test]
fn test_install_directory_rules() {
    let dir = ConfiguredDirFixture::new().build();
    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();

    let err = snapshot
        .store_mut()
        .assign_batch(&["libdir=/usr/lib64"])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }));

    let err = snapshot.store_mut().assign_batch(&["prefix=opt"]).unwrap_err();
    assert!(err.is_validation_error());

    snapshot.store_mut().assign_batch(&["libdir=lib64"]).unwrap();
    assert_eq!(snapshot.store().get("libdir").unwrap().render(), "lib64");
}

// =============================================================================
// Snapshot compatibility
// =============================================================================

#[test]
fn test_save_never_touches_build_description() {
    let dir = ConfiguredDirFixture::new().build();
    let path = build_file(dir.path());
    let edited = format!("{}backend: ninja\n", fs::read_to_string(&path).unwrap());
    fs::write(&path, &edited).unwrap();

    let mut snapshot = SnapshotStore::load(dir.path()).unwrap();
    snapshot.store_mut().assign_batch(&["unity=true"]).unwrap();
    snapshot.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), edited);
}

#[test]
fn test_version_mismatch_is_fatal() {
    let dir = ConfiguredDirFixture::new().build();
    let path = options_file(dir.path());
    let mut document: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    document["version"] = serde_yaml::Value::from("0.0.1-ancient");
    fs::write(&path, serde_yaml::to_string(&document).unwrap()).unwrap();

    let err = SnapshotStore::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::VersionMismatch { ref found, .. } if found == "0.0.1-ancient"));
    assert!(err.is_unusable_directory());
}

#[test]
fn test_missing_snapshot_files() {
    let empty = tempfile::tempdir().unwrap();
    let err = SnapshotStore::load(empty.path()).unwrap_err();
    assert!(matches!(err, Error::NotAConfiguredDirectory { .. }));

    let dir = ConfiguredDirFixture::new().build();
    fs::remove_file(build_file(dir.path())).unwrap();
    let err = SnapshotStore::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::NotAConfiguredDirectory { .. }));
}

// =============================================================================
// Reporting
// =============================================================================

#[test]
fn test_report_of_loaded_snapshot() {
    let dir = ConfiguredDirFixture::new()
        .with_language("cpp")
        .with_user_option(UserOption::boolean("with_docs", "Build documentation", false))
        .with_compiler_option(
            UserOption::combo(
                "cpp_std",
                "C++ language standard to use",
                vec!["c++11".to_string(), "c++14".to_string()],
                "c++11",
            )
            .unwrap(),
        )
        .build();

    let snapshot = SnapshotStore::load(dir.path()).unwrap();
    let mut out = Vec::new();
    Reporter::from_snapshot(&snapshot).write_to(&mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.starts_with("Core properties:\n  Source dir /src/project\n"));
    assert!(report.contains("\nCompiler arguments:\n  cppargs []\n"));
    assert!(report.contains("\nLinker args:\n  cpplinkargs []\n"));
    assert!(report.contains("  cpp_std "));
    assert!(report.contains("  with_docs "));
    assert!(!report.contains("No compiler options"));
    assert!(!report.contains("This project does not have any options"));
    assert!(report.lines().all(|line| !line.ends_with(' ')));
}
