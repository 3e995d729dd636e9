use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::compile::CompileError;
use crate::config::Version;
use crate::consts::{OUTPUT_EXT, SOURCE_DIR};
use crate::util::hash::ContentHash;

/// Where one task reads its sources and writes its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
  /// Task name: the version string, or `default` for the implicit tree.
  pub name: String,
  /// Directory holding the `*.scss` sources.
  pub source_dir: PathBuf,
  /// Directory receiving the compiled `*.css` files.
  pub dest_dir: PathBuf,
}

impl BuildTarget {
  /// `<root>/<version>/sass` compiled into `<root>/<version>`.
  pub fn for_version(root: &Path, version: &Version) -> Self {
    let dest_dir = root.join(version.as_str());
    Self {
      name: version.to_string(),
      source_dir: dest_dir.join(SOURCE_DIR),
      dest_dir,
    }
  }

  /// `<root>/sass` compiled into `<root>`.
  pub fn implicit(root: &Path, name: &str) -> Self {
    Self {
      name: name.to_string(),
      source_dir: root.join(SOURCE_DIR),
      dest_dir: root.to_path_buf(),
    }
  }

  /// Output path for `source`: same base name, compiled extension, in `dest_dir`.
  pub fn output_path(&self, source: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?.to_str()?;
    Some(self.dest_dir.join(format!("{}.{}", stem, OUTPUT_EXT)))
  }
}

/// Errors that can occur while building a target.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The target's source directory does not exist.
  #[error("source directory not found: {}", .0.display())]
  SourceDirMissing(PathBuf),

  /// Listing the source directory failed.
  #[error("failed to read {}: {source}", .path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A source has no usable file name.
  #[error("invalid source file name: {}", .0.display())]
  InvalidSourceName(PathBuf),

  /// A source failed to compile.
  #[error(transparent)]
  Compile(#[from] CompileError),

  /// Creating the destination directory failed.
  #[error("failed to create {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Writing an output file failed.
  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// One compiled file written by a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
  pub source: PathBuf,
  pub output: PathBuf,
  /// Size of the written CSS in bytes.
  pub bytes: u64,
  /// SHA-256 of the written CSS.
  pub hash: ContentHash,
}

/// Result of a successful build of one target.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub target: BuildTarget,
  /// Written outputs, in source order.
  pub outputs: Vec<OutputFile>,
  pub elapsed_ms: u64,
}

impl BuildReport {
  pub fn output_count(&self) -> usize {
    self.outputs.len()
  }

  pub fn total_bytes(&self) -> u64 {
    self.outputs.iter().map(|o| o.bytes).sum()
  }
}
