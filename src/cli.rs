//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use kitpack::config;
use kitpack::defaults::DEFAULT_CONFIG_FILENAME;
use kitpack::output::OutputConfig;

use crate::commands;

/// kitpack - Package curated source trees into size-capped zip parts
#[derive(Parser, Debug)]
#[command(name = "kitpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace) or a RUST_LOG-style filter
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Path to a kitpack.yaml configuration file
    #[arg(long, global = true, value_name = "FILE", env = "KITPACK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage a repository, overlay the kit tree and write size-capped zip parts
    Pack(commands::pack::PackArgs),

    /// Find duplicate C sources by basename and propose deletions
    Dupes(commands::dupes::DupesArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Pack(args) => {
                let config = config::load(self.config.as_deref(), Path::new(DEFAULT_CONFIG_FILENAME))?;
                commands::pack::execute(args, &config, &output)
            }
            Commands::Dupes(args) => {
                let config = config::load(self.config.as_deref(), Path::new(DEFAULT_CONFIG_FILENAME))?;
                commands::dupes::execute(args, &config, &output)
            }
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr at the requested level.
fn init_logging(filter: &str) {
    // Ignore the error: a logger may already be installed when embedded.
    let _ = env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp(None)
        .try_init();
}
