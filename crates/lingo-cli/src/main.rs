//! lingo CLI tool.
//!
//! Usage:
//! ```bash
//! lingo check [OPTIONS] [PATH]
//! lingo list-checkers
//! lingo guide
//! lingo init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks Go sources against a configurable set of style checkers
#[derive(Parser)]
#[command(name = "lingo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LINGO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Go files under a directory
    Check {
        /// Directory to check (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific checkers (comma-separated)
        #[arg(long)]
        checkers: Option<String>,

        /// Abort on the first file that fails to parse
        #[arg(long)]
        fail_on_parse_error: bool,
    },

    /// List available checkers
    ListCheckers,

    /// Print a Markdown guide for the configured checkers
    Guide {
        /// Directory whose configuration is used (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            checkers,
            fail_on_parse_error,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(
                &path,
                &source,
                &commands::check::Options {
                    format,
                    checkers,
                    fail_on_parse_error,
                },
            )
        }
        Commands::ListCheckers => {
            commands::list_checkers::run()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Guide { path } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::guide::run(&path, &source)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
