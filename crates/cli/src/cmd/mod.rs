mod build;
mod list;

use std::path::Path;

use anyhow::{Context, Result};

use themekit_lib::config::ProjectConfig;
use themekit_lib::tasks::TaskTable;

pub use build::cmd_build;
pub use list::cmd_list;

/// Load the project at `root` and register its tasks.
fn load_tasks(root: &Path, config: Option<&Path>) -> Result<TaskTable> {
  let project = ProjectConfig::load(root, config)
    .with_context(|| format!("Failed to load project: {}", root.display()))?;
  Ok(TaskTable::from_config(&project))
}
