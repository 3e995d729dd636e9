//! Reporting targets for compilation errors.
//!
//! Error handlers receive the sink they report to as an argument; nothing in
//! the crate reaches for a global notifier. When a caller has no sink at all,
//! [`handle_compile_error`] falls back to [`StderrSink`].

use std::sync::Mutex;

use tracing::error;

use crate::compile::CompileError;

/// Receives every compilation error a build encounters.
pub trait ErrorSink: Send + Sync {
  fn report(&self, error: &CompileError);
}

/// Forward `error` to `sink`, or to standard error when no sink is available.
pub fn handle_compile_error(error: &CompileError, sink: Option<&dyn ErrorSink>) {
  match sink {
    Some(sink) => sink.report(error),
    None => StderrSink.report(error),
  }
}

/// Logs errors through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
  fn report(&self, err: &CompileError) {
    error!(
      path = %err.path.display(),
      line = ?err.line,
      column = ?err.column,
      "{}",
      err.message
    );
  }
}

/// Writes a human-readable line per error to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
  fn report(&self, error: &CompileError) {
    eprintln!("error: {}", error);
  }
}

/// Keeps reported errors in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
  errors: Mutex<Vec<CompileError>>,
}

impl CollectingSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Errors reported so far, in order.
  pub fn errors(&self) -> Vec<CompileError> {
    self.errors.lock().map(|e| e.clone()).unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self.errors.lock().map(|e| e.len()).unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl ErrorSink for CollectingSink {
  fn report(&self, error: &CompileError) {
    if let Ok(mut errors) = self.errors.lock() {
      errors.push(error.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tracing_test::traced_test;

  fn sample() -> CompileError {
    CompileError {
      path: "3.18/sass/gtk.scss".into(),
      message: "expected \"}\".".to_string(),
      line: Some(4),
      column: Some(2),
    }
  }

  #[test]
  fn handler_forwards_to_given_sink() {
    let sink = CollectingSink::new();
    handle_compile_error(&sample(), Some(&sink));
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.errors()[0], sample());
  }

  #[test]
  fn handler_without_sink_does_not_panic() {
    handle_compile_error(&sample(), None);
  }

  #[test]
  #[traced_test]
  fn tracing_sink_logs_path_and_message() {
    TracingSink.report(&sample());
    assert!(logs_contain("gtk.scss"));
    assert!(logs_contain("expected"));
  }
}
