use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// themekit - Compile theme stylesheets into compressed CSS
#[derive(Parser)]
#[command(name = "themekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root holding the version directories, or `sass/` when there are none
  #[arg(short = 'C', long, global = true, default_value = ".")]
  root: PathBuf,

  /// Config file (default: <root>/themekit.toml, if present)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile the stylesheets of a task
  Build {
    /// Task to run: a version, or `default` for every version
    task: Option<String>,
  },

  /// List the available tasks
  List,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Initialize logging
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let config = cli.config.as_deref();
  match &cli.command {
    Commands::Build { task } => cmd::cmd_build(&cli.root, config, task.as_deref(), cli.verbose, cli.output),
    Commands::List => cmd::cmd_list(&cli.root, config, cli.output),
  }
}
