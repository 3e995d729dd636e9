//! Types for task execution.

use serde::Serialize;
use thiserror::Error;

use crate::build::{BuildError, BuildReport};

/// Errors that can occur while running a task.
#[derive(Debug, Error)]
pub enum TaskError {
  /// No task is registered under this name.
  #[error("unknown task '{name}' (available: {available})")]
  UnknownTask { name: String, available: String },

  /// A build failed; for the aggregate task this is the first failure seen.
  #[error("task '{task}' failed")]
  Build {
    task: String,
    #[source]
    source: BuildError,
  },

  /// A build panicked or was cancelled before finishing.
  #[error("task '{task}' did not complete: {message}")]
  Join { task: String, message: String },
}

impl TaskError {
  /// Name of the task the error belongs to, if any.
  pub fn task(&self) -> Option<&str> {
    match self {
      TaskError::UnknownTask { .. } => None,
      TaskError::Build { task, .. } | TaskError::Join { task, .. } => Some(task),
    }
  }
}

/// Result of running a task: one build report per target it covered.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  /// Name the task was invoked under.
  pub task: String,
  /// Reports in configuration order.
  pub builds: Vec<BuildReport>,
}

impl RunReport {
  pub fn output_count(&self) -> usize {
    self.builds.iter().map(BuildReport::output_count).sum()
  }
}
