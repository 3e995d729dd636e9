//! Stylesheet builds.
//!
//! A build compiles every source of one [`BuildTarget`] and writes one CSS file
//! per source into the target's destination directory. Builds keep no state
//! between runs: the source set is listed fresh and every output is rewritten.
//!
//! # Characteristics
//!
//! - **All or nothing**: sources compile in memory first; a single failure
//!   leaves every existing output of the target untouched
//! - **Atomic writes**: each output is renamed into place from a temp file
//! - **Isolated**: a target only ever writes inside its own destination directory
//!
//! # Submodules
//!
//! - [`execute`] - Compiling and writing a single target
//! - [`sources`] - Listing the sources of a target

pub mod execute;
pub mod sources;
mod types;

pub use execute::build_target;
pub use types::*;
