//! Common test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Get the path to the test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create a temporary directory holding copies of the named fixtures.
///
/// Profiles and mismatch lines record paths as given. Binary tests that
/// compare them exactly set this directory as the working directory and pass
/// bare file names; library tests pass the joined paths.
pub fn create_temp_project(fixtures: &[&str]) -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    for name in fixtures {
        copy_fixture(name, temp.path());
    }
    temp
}

fn copy_fixture(name: &str, dir: &Path) {
    std::fs::copy(fixtures_dir().join(name), dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to copy {}: {}", name, e));
}
