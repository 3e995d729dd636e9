//! Shared test helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Config declaring two versions, matching the multi-version theme layout.
pub const TWO_VERSIONS: &str = r#"versions = ["3.18", "3.20"]"#;

/// Isolated project directory.
///
/// Each test gets its own temporary root holding sources, outputs and config.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty project.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create a project with `themekit.toml` set to `config`.
  pub fn with_config(config: &str) -> Self {
    let env = Self::empty();
    env.write_file("themekit.toml", config);
    env
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Read a file relative to the project root.
  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// Get a Command for the themekit binary, rooted at this project.
  pub fn themekit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("themekit");
    cmd.arg("--root").arg(self.root());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
