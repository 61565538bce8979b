//! Common test utilities for luapack integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary source tree for integration tests
pub struct TestTree {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the tree root
    pub path: PathBuf,
}

impl TestTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file at a relative path, creating parent directories
    #[allow(dead_code)]
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}
