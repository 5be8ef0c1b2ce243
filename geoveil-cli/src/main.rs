//! Geoveil CLI - Command-line interface
//!
//! Masks entity locations and projects points into map viewports using the
//! geoveil library.

mod commands;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use geoveil::config::{config_file_path, ConfigFile};
use geoveil::logging::{init_logging, LoggingGuard};

use commands::config::ConfigCommands;
use commands::mask::MaskArgs;
use commands::project::ProjectArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geoveil")]
#[command(version, about = "Location privacy masking and map overlay projection")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this configuration file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the masked location for an entity
    Mask(MaskArgs),

    /// Project a point into a map viewport
    Project(ProjectArgs),

    /// View or modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.unwrap_or_else(config_file_path);

    match cli.command {
        // Config commands must work even when the file is broken
        Commands::Config(command) => commands::config::run(command, &config_path),
        Commands::Mask(args) => {
            let (config, _log_guard) = prepare(&config_path, cli.verbose)?;
            commands::mask::run(args, &config)
        }
        Commands::Project(args) => {
            let (config, _log_guard) = prepare(&config_path, cli.verbose)?;
            commands::project::run(args, &config)
        }
    }
}

/// Load configuration and install logging for an engine command.
fn prepare(config_path: &Path, verbose: bool) -> Result<(ConfigFile, LoggingGuard), CliError> {
    let config = ConfigFile::load_from(config_path)?;

    let mut logging = config.logging.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    let guard = init_logging(&logging)?;
    tracing::debug!(config = %config_path.display(), "Loaded configuration");

    Ok((config, guard))
}
