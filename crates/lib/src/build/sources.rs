//! Source enumeration.
//!
//! A target's sources are the `*.scss` files directly inside its source
//! directory. The listing is flat: partials in subdirectories are reached
//! through the stylesheet's own `@use`/`@import`, not through this listing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::build::BuildError;
use crate::consts::{PARTIAL_PREFIX, SOURCE_EXT};

/// List the sources in `dir`, sorted by file name.
///
/// Partials (`_name.scss`) are skipped since they never produce output of
/// their own, and so are hidden files (`.name.scss`).
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  if !dir.is_dir() {
    return Err(BuildError::SourceDirMissing(dir.to_path_buf()));
  }

  let read_err = |source: std::io::Error| BuildError::ReadDir {
    path: dir.to_path_buf(),
    source,
  };

  let mut sources = Vec::new();
  for entry in fs::read_dir(dir).map_err(read_err)? {
    let path = entry.map_err(read_err)?.path();
    if is_source(&path) {
      sources.push(path);
    } else {
      trace!(path = ?path, "skipping non-source entry");
    }
  }

  sources.sort();
  Ok(sources)
}

fn is_source(path: &Path) -> bool {
  let has_ext = path.extension().is_some_and(|ext| ext == SOURCE_EXT);
  let skipped = path
    .file_name()
    .and_then(|name| name.to_str())
    .is_some_and(|name| name.starts_with(PARTIAL_PREFIX) || name.starts_with('.'));

  has_ext && !skipped && path.is_file()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::{source_dir, write_file};
  use tempfile::TempDir;

  fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
      .collect()
  }

  #[test]
  fn empty_directory_has_no_sources() {
    let temp = TempDir::new().unwrap();
    let dir = source_dir(temp.path(), None);
    assert!(collect_sources(&dir).unwrap().is_empty());
  }

  #[test]
  fn lists_scss_sorted_and_skips_partials() {
    let temp = TempDir::new().unwrap();
    let dir = source_dir(temp.path(), None);
    write_file(temp.path(), "sass/gtk.scss", "");
    write_file(temp.path(), "sass/gtk-dark.scss", "");
    write_file(temp.path(), "sass/_colors.scss", "");
    write_file(temp.path(), "sass/notes.txt", "");
    write_file(temp.path(), "sass/widgets/button.scss", "");

    let sources = collect_sources(&dir).unwrap();
    assert_eq!(names(&sources), vec!["gtk-dark.scss", "gtk.scss"]);
  }

  #[test]
  fn hidden_files_are_skipped() {
    let temp = TempDir::new().unwrap();
    let dir = source_dir(temp.path(), None);
    write_file(temp.path(), "sass/.draft.scss", "");
    write_file(temp.path(), "sass/gtk.scss", "");

    let sources = collect_sources(&dir).unwrap();
    assert_eq!(names(&sources), vec!["gtk.scss"]);
  }

  #[test]
  fn directory_named_like_source_is_skipped() {
    let temp = TempDir::new().unwrap();
    let dir = source_dir(temp.path(), None);
    std::fs::create_dir(dir.join("odd.scss")).unwrap();
    assert!(collect_sources(&dir).unwrap().is_empty());
  }

  #[test]
  fn missing_directory_is_error() {
    let temp = TempDir::new().unwrap();
    let result = collect_sources(&temp.path().join("sass"));
    assert!(matches!(result, Err(BuildError::SourceDirMissing(_))));
  }
}
