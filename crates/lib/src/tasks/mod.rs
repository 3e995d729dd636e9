//! Named build tasks.
//!
//! [`TaskTable::from_config`] turns the configured version list into one task
//! per version plus the aggregate `default` task. A project without versions
//! has a single `default` task over the implicit `sass/` tree.
//!
//! The aggregate runs its versions in parallel:
//! - Each version builds on a blocking worker with its own compiler instance
//! - A semaphore bounds how many versions build at once
//! - The first failure is returned and the remaining tasks are aborted
//!   (best effort: a build already running finishes in the background)

mod types;

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::build::{BuildReport, BuildTarget, build_target};
use crate::compile::{GrassCompiler, StylesheetCompiler};
use crate::config::{BuildOptions, ProjectConfig};
use crate::consts::DEFAULT_TASK;
use crate::sink::ErrorSink;

pub use types::{RunReport, TaskError};

/// Creates the compiler a single task builds with.
pub type CompilerFactory = fn() -> Box<dyn StylesheetCompiler>;

fn grass_compiler() -> Box<dyn StylesheetCompiler> {
  Box::new(GrassCompiler::new())
}

/// The build tasks of a project, addressable by name.
#[derive(Debug, Clone)]
pub struct TaskTable {
  /// One target per version in configuration order, or the implicit target.
  targets: Vec<BuildTarget>,
  versioned: bool,
  options: BuildOptions,
  parallelism: usize,
  compiler: CompilerFactory,
}

impl TaskTable {
  /// Register one task per configured version, or the implicit tree when
  /// there are none.
  pub fn from_config(config: &ProjectConfig) -> Self {
    let targets: Vec<BuildTarget> = if config.is_versioned() {
      config
        .versions
        .iter()
        .map(|version| BuildTarget::for_version(&config.root, version))
        .collect()
    } else {
      vec![BuildTarget::implicit(&config.root, DEFAULT_TASK)]
    };

    debug!(tasks = targets.len(), versioned = config.is_versioned(), "registered tasks");

    Self {
      targets,
      versioned: config.is_versioned(),
      options: config.options,
      parallelism: config.parallelism.max(1),
      compiler: grass_compiler,
    }
  }

  /// Build with compilers made by `compiler` instead of `grass`.
  pub fn with_compiler(mut self, compiler: CompilerFactory) -> Self {
    self.compiler = compiler;
    self
  }

  /// Task names: each version in configuration order, then `default`.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::with_capacity(self.targets.len() + 1);
    if self.versioned {
      names.extend(self.targets.iter().map(|t| t.name.as_str()));
    }
    names.push(DEFAULT_TASK);
    names
  }

  /// Targets built by the default task, in configuration order.
  pub fn targets(&self) -> &[BuildTarget] {
    &self.targets
  }

  /// Target of a single-version task.
  ///
  /// In a versioned project `default` is an aggregate and has no single target.
  pub fn get(&self, name: &str) -> Option<&BuildTarget> {
    self.targets.iter().find(|t| t.name == name)
  }

  pub fn is_versioned(&self) -> bool {
    self.versioned
  }

  pub fn options(&self) -> &BuildOptions {
    &self.options
  }

  /// Run the task called `name`.
  pub async fn run(&self, name: &str, sink: Arc<dyn ErrorSink>) -> Result<RunReport, TaskError> {
    if name == DEFAULT_TASK {
      return self.run_default(sink).await;
    }

    let target = self.get(name).cloned().ok_or_else(|| TaskError::UnknownTask {
      name: name.to_string(),
      available: self.names().join(", "),
    })?;

    let report = run_target(target, self.options, self.compiler, sink).await?;
    Ok(RunReport {
      task: name.to_string(),
      builds: vec![report],
    })
  }

  /// Run every target and wait for all of them, failing on the first error.
  pub async fn run_default(&self, sink: Arc<dyn ErrorSink>) -> Result<RunReport, TaskError> {
    info!(
      tasks = self.targets.len(),
      parallelism = self.parallelism,
      "running default task"
    );

    let semaphore = Arc::new(Semaphore::new(self.parallelism));
    let mut join_set = JoinSet::new();

    for (idx, target) in self.targets.iter().cloned().enumerate() {
      let semaphore = semaphore.clone();
      let sink = sink.clone();
      let options = self.options;
      let compiler = self.compiler;

      join_set.spawn(async move {
        // Acquire semaphore permit inside the task
        let _permit = semaphore.acquire_owned().await.map_err(|e| TaskError::Join {
          task: target.name.clone(),
          message: e.to_string(),
        })?;

        let report = run_target(target, options, compiler, sink).await?;
        Ok::<_, TaskError>((idx, report))
      });
    }

    let mut completed: Vec<(usize, BuildReport)> = Vec::with_capacity(self.targets.len());

    while let Some(join_result) = join_set.join_next().await {
      match join_result {
        Ok(Ok((idx, report))) => {
          info!(task = %report.target.name, "task succeeded");
          completed.push((idx, report));
        }
        Ok(Err(e)) => {
          debug!(task = e.task().unwrap_or_default(), error = %e, "task failed, aborting remaining tasks");
          join_set.abort_all();
          return Err(e);
        }
        Err(e) => {
          // Task panicked
          error!(error = %e, "task panicked, aborting remaining tasks");
          join_set.abort_all();
          return Err(TaskError::Join {
            task: DEFAULT_TASK.to_string(),
            message: e.to_string(),
          });
        }
      }
    }

    completed.sort_by_key(|(idx, _)| *idx);
    Ok(RunReport {
      task: DEFAULT_TASK.to_string(),
      builds: completed.into_iter().map(|(_, report)| report).collect(),
    })
  }
}

/// Build one target on a blocking worker.
async fn run_target(
  target: BuildTarget,
  options: BuildOptions,
  compiler: CompilerFactory,
  sink: Arc<dyn ErrorSink>,
) -> Result<BuildReport, TaskError> {
  let task = target.name.clone();

  let joined = tokio::task::spawn_blocking(move || {
    let compiler = compiler();
    build_target(&target, &options, compiler.as_ref(), sink.as_ref())
  })
  .await;

  match joined {
    Ok(Ok(report)) => Ok(report),
    Ok(Err(source)) => Err(TaskError::Build { task, source }),
    Err(e) => Err(TaskError::Join {
      task,
      message: e.to_string(),
    }),
  }
}
