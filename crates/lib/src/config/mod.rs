//! Project configuration.
//!
//! A project is a root directory plus an optional `themekit.toml` listing the
//! theme versions to build and the compiler options to use. Without a config
//! file the project is a single implicit tree: `sass/*.scss` compiles into the
//! root.
//!
//! ```toml
//! versions = ["3.18", "3.20"]
//! parallelism = 2
//!
//! [options]
//! compress = true
//! precision = 5
//! ```

mod types;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, MAX_PRECISION};

pub use types::*;

impl ProjectConfig {
  /// Load the project rooted at `root`.
  ///
  /// `config_path` points at an explicit config file, which must exist. When it
  /// is `None`, `<root>/themekit.toml` is used if present and defaults otherwise.
  pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
    let root = dunce::canonicalize(root).map_err(|source| ConfigError::RootNotFound {
      path: root.to_path_buf(),
      source,
    })?;

    let path = match config_path {
      Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
      Some(path) => path.to_path_buf(),
      None => {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
          debug!(root = ?root, "no config file, using single implicit tree");
          return Ok(ProjectConfig::single(root));
        }
        path
      }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    debug!(path = ?path, "loaded config file");
    Self::parse(root, &path, &content)
  }

  /// Parse config file `content` for the project at `root`.
  ///
  /// `path` is only used in error messages.
  pub fn parse(root: impl Into<PathBuf>, path: &Path, content: &str) -> Result<Self, ConfigError> {
    let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      message: e.message().to_string(),
    })?;

    let mut seen = HashSet::new();
    for version in &file.versions {
      if !seen.insert(version.as_str()) {
        return Err(ConfigError::DuplicateVersion(version.to_string()));
      }
    }

    if file.options.precision > MAX_PRECISION {
      return Err(ConfigError::InvalidPrecision(file.options.precision));
    }

    let mut config = ProjectConfig::with_versions(root, file.versions);
    config.options = file.options;
    if let Some(parallelism) = file.parallelism {
      if parallelism == 0 {
        return Err(ConfigError::InvalidParallelism);
      }
      config.parallelism = parallelism;
    }

    Ok(config)
  }
}
