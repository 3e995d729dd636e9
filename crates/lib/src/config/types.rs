//! Configuration types: versions, compiler options, and the loaded project.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_PRECISION, DEFAULT_TASK, MAX_PRECISION};

/// Errors that can occur while loading or validating project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The config file given explicitly does not exist.
  #[error("config file not found: {}", .0.display())]
  NotFound(PathBuf),

  /// The project root does not exist or cannot be resolved.
  #[error("project root not found: {}", .path.display())]
  RootNotFound {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Reading the config file failed.
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The config file is not valid TOML or has unknown keys.
  #[error("failed to parse {}: {message}", .path.display())]
  Parse { path: PathBuf, message: String },

  /// A version identifier cannot be used as a directory name.
  #[error("invalid version '{0}': must be a single directory name")]
  InvalidVersion(String),

  /// A version collides with the aggregate task name.
  #[error("version '{0}' is reserved for the aggregate task")]
  ReservedVersion(String),

  /// The same version is listed twice.
  #[error("version '{0}' is listed more than once")]
  DuplicateVersion(String),

  /// Precision beyond what the compiler can emit.
  #[error("precision {0} is out of range (max {max})", max = MAX_PRECISION)]
  InvalidPrecision(u8),

  /// Parallelism must allow at least one task to run.
  #[error("parallelism must be at least 1")]
  InvalidParallelism,
}

/// A theme version such as `3.18`, naming one self-contained source tree.
///
/// Versions come from static configuration and are only ever used as a single
/// path component below the project root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
  pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty()
      || trimmed != name
      || name == "."
      || name == ".."
      || name.contains(['/', '\\'])
    {
      return Err(ConfigError::InvalidVersion(name));
    }
    if name == DEFAULT_TASK {
      return Err(ConfigError::ReservedVersion(name));
    }
    Ok(Self(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Version {
  type Error = ConfigError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Version::new(value)
  }
}

impl From<Version> for String {
  fn from(value: Version) -> Self {
    value.0
  }
}

impl std::fmt::Display for Version {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Options handed to the stylesheet compiler for every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
  /// Emit compressed (whitespace-free) CSS instead of expanded output.
  pub compress: bool,

  /// Maximum number of fractional digits kept in numeric values.
  pub precision: u8,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      compress: true,
      precision: DEFAULT_PRECISION,
    }
  }
}

/// On-disk shape of `themekit.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
  pub versions: Vec<Version>,
  pub parallelism: Option<usize>,
  pub options: BuildOptions,
}

/// A fully resolved project: where it lives, which versions it builds, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
  /// Project root; version directories and the implicit `sass/` tree live here.
  pub root: PathBuf,

  /// Configured versions, in declaration order. Empty means a single implicit tree.
  pub versions: Vec<Version>,

  /// Compiler options shared by every task.
  pub options: BuildOptions,

  /// Maximum number of versions built at the same time by the aggregate task.
  pub parallelism: usize,
}

impl ProjectConfig {
  /// A project with no version dimension: `sass/` compiles into the root.
  pub fn single(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      versions: Vec::new(),
      options: BuildOptions::default(),
      parallelism: num_cpus(),
    }
  }

  /// A project building each of `versions` from `<version>/sass/` into `<version>/`.
  pub fn with_versions(root: impl Into<PathBuf>, versions: Vec<Version>) -> Self {
    Self {
      versions,
      ..Self::single(root)
    }
  }

  /// Whether the project has a version dimension.
  pub fn is_versioned(&self) -> bool {
    !self.versions.is_empty()
  }
}

/// Get the number of CPUs for default parallelism.
fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}
