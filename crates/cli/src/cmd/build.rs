//! Implementation of the `themekit build` command.
//!
//! Runs one named task, or the aggregate `default` task when no name is given,
//! and prints what was written.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use themekit_lib::consts::DEFAULT_TASK;
use themekit_lib::sink::{ErrorSink, TracingSink};

use crate::output::{
  OutputFormat, TerminalSink, format_bytes, format_duration, print_info, print_json, print_success, symbols,
  truncate_hash,
};

/// Execute the build command.
///
/// Compilation errors are reported as they happen: on the terminal in text
/// mode, through the log in JSON mode so stdout stays machine-readable.
pub fn cmd_build(
  root: &Path,
  config: Option<&Path>,
  task: Option<&str>,
  verbose: bool,
  format: OutputFormat,
) -> Result<()> {
  let table = super::load_tasks(root, config)?;
  let task = task.unwrap_or(DEFAULT_TASK);
  debug!(task, tasks = ?table.names(), "running task");

  let sink: Arc<dyn ErrorSink> = if format.is_json() {
    Arc::new(TracingSink)
  } else {
    Arc::new(TerminalSink)
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(table.run(task, sink))?;

  if format.is_json() {
    return print_json(&report);
  }

  for build in &report.builds {
    print_success(&format!(
      "{} {} {} ({} stylesheet(s), {})",
      build.target.name,
      symbols::ARROW,
      build.target.dest_dir.display(),
      build.output_count(),
      format_duration(Duration::from_millis(build.elapsed_ms))
    ));

    if verbose {
      for output in &build.outputs {
        println!(
          "    {} {} ({}, {})",
          symbols::INFO,
          output.output.display(),
          format_bytes(output.bytes),
          truncate_hash(&output.hash.0)
        );
      }
    }
  }

  print_info(&format!(
    "Task '{}' complete: {} stylesheet(s) written",
    report.task,
    report.output_count()
  ));

  Ok(())
}
