//! Shared test utilities for aliasgen tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use aliasgen::platform::Platform;

/// Test environment with a temporary configuration root.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Mock configuration root holding the base templates
    pub root: PathBuf,
    /// Scratch directory for user lists and generated output
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("root");
        let work = temp_dir.path().join("work");

        fs::create_dir_all(&root).expect("Failed to create root dir");
        fs::create_dir_all(&work).expect("Failed to create work dir");

        Self {
            _temp_dir: temp_dir,
            root,
            work,
        }
    }

    /// Write the base template for `platform` and return its path.
    pub fn write_template(&self, platform: Platform, content: &str) -> PathBuf {
        let path = platform.template_path(&self.root);
        fs::create_dir_all(path.parent().expect("template has parent"))
            .expect("Failed to create template dir");
        fs::write(&path, content).expect("Failed to write template");
        path
    }

    /// Write a JSON user list and return its path.
    pub fn write_users(&self, json: &str) -> PathBuf {
        let path = self.work.join("users.json");
        fs::write(&path, json).expect("Failed to write users");
        path
    }

    pub fn output(&self) -> PathBuf {
        self.work.join("etc/aliases")
    }
}

/// Assert that a file has exactly the expected content.
pub fn assert_file_eq(path: &Path, expected: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
    assert_eq!(
        content,
        expected,
        "File {} has unexpected content",
        path.display()
    );
}
