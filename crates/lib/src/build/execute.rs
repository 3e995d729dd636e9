//! Single target build.
//!
//! This module compiles every source of a target and writes the outputs,
//! producing the final BuildReport.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::build::sources::collect_sources;
use crate::build::{BuildError, BuildReport, BuildTarget, OutputFile};
use crate::compile::StylesheetCompiler;
use crate::config::BuildOptions;
use crate::sink::{ErrorSink, handle_compile_error};
use crate::util::hash::hash_bytes;

/// Build a single target.
///
/// Every source is compiled before anything is written. The first compilation
/// failure is handed to `sink` and returned as [`BuildError::Compile`]; in that
/// case no file in the destination directory is touched.
///
/// # Arguments
///
/// * `target` - Source and destination directories
/// * `options` - Compiler options
/// * `compiler` - Compiler used for every source of this target
/// * `sink` - Receives the compilation error, if any
pub fn build_target(
  target: &BuildTarget,
  options: &BuildOptions,
  compiler: &dyn StylesheetCompiler,
  sink: &dyn ErrorSink,
) -> Result<BuildReport, BuildError> {
  let started = Instant::now();
  info!(
    task = %target.name,
    source_dir = ?target.source_dir,
    "building stylesheets"
  );

  let sources = collect_sources(&target.source_dir)?;
  debug!(task = %target.name, count = sources.len(), "collected sources");

  let mut compiled = Vec::with_capacity(sources.len());
  for source in sources {
    let output = target
      .output_path(&source)
      .ok_or_else(|| BuildError::InvalidSourceName(source.clone()))?;

    debug!(source = ?source, "compiling");
    match compiler.compile(&source, options) {
      Ok(css) => compiled.push((source, output, css)),
      Err(e) => {
        handle_compile_error(&e, Some(sink));
        return Err(BuildError::Compile(e));
      }
    }
  }

  if !compiled.is_empty() {
    fs::create_dir_all(&target.dest_dir).map_err(|source| BuildError::CreateDir {
      path: target.dest_dir.clone(),
      source,
    })?;
  }

  let mut outputs = Vec::with_capacity(compiled.len());
  for (source, output, css) in compiled {
    write_atomic(&target.dest_dir, &output, css.as_bytes()).map_err(|e| BuildError::Write {
      path: output.clone(),
      source: e,
    })?;
    debug!(output = ?output, bytes = css.len(), "wrote stylesheet");

    outputs.push(OutputFile {
      source,
      output,
      bytes: css.len() as u64,
      hash: hash_bytes(css.as_bytes()),
    });
  }

  let report = BuildReport {
    target: target.clone(),
    outputs,
    elapsed_ms: started.elapsed().as_millis() as u64,
  };

  info!(
    task = %target.name,
    outputs = report.output_count(),
    elapsed_ms = report.elapsed_ms,
    "build complete"
  );

  Ok(report)
}

/// Write `bytes` to `path` through a temp file in `dir`, so readers only ever
/// see the old or the new content.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
  let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
  tmp.write_all(bytes)?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
