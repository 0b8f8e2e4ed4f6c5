use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// parcel - package manifest inspection tools
#[derive(Parser)]
#[command(name = "parcel", version, about)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Parse a manifest and print its canonical form
  Show {
    /// Path to the manifest file
    manifest: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// Compare two manifests and print added/removed lines
  Diff {
    /// The newer manifest (additions come from here)
    newer: PathBuf,

    /// The older manifest; omitted means the empty baseline, reporting
    /// everything in the newer manifest as an addition
    older: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Show { manifest, format } => cmd::show::cmd_show(&manifest, format),
    Commands::Diff { newer, older, format } => cmd::diff::cmd_diff(&newer, older.as_deref(), format),
  }
}
