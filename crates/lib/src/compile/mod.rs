//! Stylesheet compilation.
//!
//! The compiler itself is external: [`GrassCompiler`] drives the `grass` Sass
//! implementation and applies the configured numeric precision to its output.
//! Builds only see the [`StylesheetCompiler`] trait, so each task can own its
//! own compiler instance.
//!
//! # Submodules
//!
//! - [`precision`] - Rounding numbers in compiled CSS

mod error;
pub mod precision;

use std::path::Path;

use tracing::trace;

use crate::config::BuildOptions;

pub use error::CompileError;
pub use precision::round_numbers;

/// Compiles one stylesheet source to CSS.
pub trait StylesheetCompiler: Send + Sync {
  /// Compile the file at `path` with `options`, returning the CSS text.
  fn compile(&self, path: &Path, options: &BuildOptions) -> Result<String, CompileError>;
}

/// [`StylesheetCompiler`] backed by `grass`.
///
/// The source's own directory is added as a load path, so `@use`/`@import` of
/// partials next to it resolve the way the compiler resolves them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassCompiler;

impl GrassCompiler {
  pub fn new() -> Self {
    Self
  }
}

impl StylesheetCompiler for GrassCompiler {
  fn compile(&self, path: &Path, options: &BuildOptions) -> Result<String, CompileError> {
    let style = if options.compress {
      grass::OutputStyle::Compressed
    } else {
      grass::OutputStyle::Expanded
    };

    let grass_options = match path.parent() {
      Some(parent) => grass::Options::default().style(style).load_path(parent),
      None => grass::Options::default().style(style),
    };

    trace!(path = ?path, compress = options.compress, "invoking grass");
    let css = grass::from_path(path, &grass_options).map_err(|e| CompileError::from_grass(path, e))?;

    Ok(round_numbers(&css, options.precision))
  }
}
