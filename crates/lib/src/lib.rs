//! themekit-lib: Core types and logic for themekit
//!
//! This crate compiles theme stylesheets:
//! - `ProjectConfig`: where a project lives and which versions it builds
//! - `BuildTarget`: the source/destination directory pair of one task
//! - `StylesheetCompiler`: the seam in front of the Sass compiler
//! - `ErrorSink`: where compilation errors are reported
//! - `TaskTable`: named tasks per version plus the aggregate `default` task

pub mod build;
pub mod compile;
pub mod config;
pub mod consts;
pub mod sink;
pub mod tasks;
pub mod util;
