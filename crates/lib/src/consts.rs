//! Fixed names and defaults shared across the crate.

/// Config file looked up in the project root when none is given explicitly.
pub const CONFIG_FILE_NAME: &str = "themekit.toml";

/// Directory under a version root (or the project root) holding the sources.
pub const SOURCE_DIR: &str = "sass";

/// Extension of stylesheet sources picked up by a build.
pub const SOURCE_EXT: &str = "scss";

/// Extension given to compiled outputs.
pub const OUTPUT_EXT: &str = "css";

/// Sources starting with this prefix are partials and only reachable via `@use`/`@import`.
pub const PARTIAL_PREFIX: char = '_';

/// Name of the aggregate task, and of the only task when no versions are configured.
pub const DEFAULT_TASK: &str = "default";

/// Decimal places kept in numeric output unless configured otherwise.
pub const DEFAULT_PRECISION: u8 = 5;

/// The compiler never emits more fractional digits than this.
pub const MAX_PRECISION: u8 = 10;
