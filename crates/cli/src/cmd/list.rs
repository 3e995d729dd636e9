//! Implementation of the `themekit list` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::output::{OutputFormat, print_json, print_stat, symbols};

#[derive(Debug, Serialize)]
struct TaskEntry<'a> {
  name: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  source_dir: Option<&'a PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  dest_dir: Option<&'a PathBuf>,
  /// Tasks run by an aggregate.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  runs: Vec<&'a str>,
}

pub fn cmd_list(root: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
  let table = super::load_tasks(root, config)?;

  let entries: Vec<TaskEntry> = table
    .names()
    .into_iter()
    .map(|name| match table.get(name) {
      Some(target) => TaskEntry {
        name,
        source_dir: Some(&target.source_dir),
        dest_dir: Some(&target.dest_dir),
        runs: Vec::new(),
      },
      None => TaskEntry {
        name,
        source_dir: None,
        dest_dir: None,
        runs: table.targets().iter().map(|t| t.name.as_str()).collect(),
      },
    })
    .collect();

  if format.is_json() {
    return print_json(&entries);
  }

  println!("Tasks:");
  for entry in &entries {
    match (entry.source_dir, entry.dest_dir) {
      (Some(source), Some(dest)) => print_stat(
        entry.name,
        &format!("{} {} {}", source.display(), symbols::ARROW, dest.display()),
      ),
      _ => print_stat(entry.name, &format!("runs {}", entry.runs.join(", "))),
    }
  }

  Ok(())
}
