//! Test support utilities for homelab integration tests.
//!
//! Provides reusable install-root setup and helper commands.

#![allow(dead_code)]

pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated install root.
///
/// No process-global state is mutated: child processes get the root via
/// `HOMELAB_ROOT` and `.current_dir()`, so tests can run in parallel.
pub struct Test {
    /// Temporary install root
    pub root: TempDir,
}

impl Test {
    /// Create an install root with an empty `containers/` directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(root.path().join("containers")).expect("failed to create containers");
        Self { root }
    }

    /// Create an install root without `containers/`.
    pub fn bare() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        Self { root }
    }

    /// Create an install root with the given stacks and templates.
    pub fn with_stacks(stacks: &[(&str, &str)]) -> Self {
        let t = Self::new();
        for (name, template) in stacks {
            t.stack(name, template);
        }
        t
    }

    /// Add a stack directory holding `.env.example`.
    pub fn stack(&self, name: &str, template: &str) -> PathBuf {
        let dir = self.stack_dir(name);
        fs::create_dir_all(&dir).expect("failed to create stack dir");
        fs::write(dir.join(".env.example"), template).expect("failed to write template");
        dir
    }

    /// Write the live `.env` of a stack directly.
    pub fn write_env(&self, name: &str, contents: &str) -> PathBuf {
        let dir = self.stack_dir(name);
        fs::create_dir_all(&dir).expect("failed to create stack dir");
        let path = dir.join(".env");
        fs::write(&path, contents).expect("failed to write env file");
        path
    }

    /// Write `homelab.toml` in the install root.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.root.path().join("homelab.toml"), contents)
            .expect("failed to write config");
    }

    pub fn stack_dir(&self, name: &str) -> PathBuf {
        self.root.path().join("containers").join(name)
    }

    pub fn env_path(&self, name: &str) -> PathBuf {
        self.stack_dir(name).join(".env")
    }

    /// Contents of a stack's `.env`.
    pub fn read_env(&self, name: &str) -> String {
        fs::read_to_string(self.env_path(name)).expect("failed to read env file")
    }
}
