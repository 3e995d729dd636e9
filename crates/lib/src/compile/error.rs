//! The single error kind a stylesheet compilation can produce.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A stylesheet failed to compile.
///
/// Carries the compiler's message and, when the compiler reports one, the
/// line and column in the offending file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileError {
  /// The source file being compiled.
  pub path: PathBuf,
  /// Compiler message, without the `Error:` prefix.
  pub message: String,
  /// 1-based line of the failure.
  pub line: Option<usize>,
  /// 1-based column of the failure.
  pub column: Option<usize>,
}

impl CompileError {
  pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      message: message.into(),
      line: None,
      column: None,
    }
  }

  /// Build from a `grass` failure.
  ///
  /// Parse errors carry their span, which becomes the 1-based line and column.
  /// Other failures (missing entry file, invalid UTF-8) only have a message.
  pub fn from_grass(path: &Path, err: Box<grass::Error>) -> Self {
    let rendered = err.to_string();
    match (*err).kind() {
      grass::ErrorKind::ParseError { message, loc, .. } => Self {
        path: path.to_path_buf(),
        message,
        line: Some(loc.begin.line + 1),
        column: Some(loc.begin.column + 1),
      },
      _ => Self::new(path, rendered.trim().trim_start_matches("Error:").trim()),
    }
  }

  /// `path:line:column`, or as much of it as is known.
  pub fn location(&self) -> String {
    match (self.line, self.column) {
      (Some(line), Some(column)) => format!("{}:{}:{}", self.path.display(), line, column),
      (Some(line), None) => format!("{}:{}", self.path.display(), line),
      _ => self.path.display().to_string(),
    }
  }
}

impl std::fmt::Display for CompileError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.location(), self.message)
  }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
  use super::*;

  fn grass_error(source: &str) -> Box<grass::Error> {
    grass::from_string(source, &grass::Options::default()).unwrap_err()
  }

  #[test]
  fn parse_error_carries_line_and_column() {
    let err = CompileError::from_grass(Path::new("sass/bad.scss"), grass_error("a { color: red;"));
    assert_eq!(err.message, "expected \"}\".");
    assert_eq!(err.line, Some(1));
    assert_eq!(err.column, Some(15));
  }

  #[test]
  fn location_points_past_the_first_line() {
    let err = CompileError::from_grass(Path::new("gtk.scss"), grass_error("a {\n  color: $missing;\n}\n"));
    assert!(err.message.contains("Undefined variable"));
    assert_eq!(err.line, Some(2));
    assert!(err.column.is_some_and(|c| c > 1));
  }

  #[test]
  fn missing_entry_file_has_message_only() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("absent.scss");
    let err = grass::from_path(&path, &grass::Options::default()).unwrap_err();

    let err = CompileError::from_grass(&path, err);
    assert!(!err.message.is_empty());
    assert!(!err.message.starts_with("Error:"));
    assert_eq!(err.line, None);
    assert_eq!(err.column, None);
  }

  #[test]
  fn display_names_the_file() {
    let err = CompileError::from_grass(Path::new("sass/bad.scss"), grass_error("a { color: red;"));
    assert_eq!(err.to_string(), "sass/bad.scss:1:15: expected \"}\".");

    let err = CompileError::new("sass/x.scss", "boom");
    assert_eq!(err.to_string(), "sass/x.scss: boom");
  }
}
