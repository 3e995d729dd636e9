//! Test utilities for themekit-lib.
//!
//! Helpers for laying out theme source trees in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `relative` below `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
  path
}

/// Create an empty `sass/` directory below `root` (or below `root/<version>`).
pub fn source_dir(root: &Path, version: Option<&str>) -> PathBuf {
  let dir = match version {
    Some(v) => root.join(v).join("sass"),
    None => root.join("sass"),
  };
  fs::create_dir_all(&dir).unwrap();
  dir
}

/// Read a file below `root` to a string.
pub fn read(root: &Path, relative: &str) -> String {
  fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
}

/// Sorted list of file names directly inside `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .unwrap()
    .flatten()
    .filter(|e| e.path().is_file())
    .map(|e| e.file_name().to_string_lossy().to_string())
    .collect();
  names.sort();
  names
}
