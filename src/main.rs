//! # kitpack CLI
//!
//! This is the binary entry point for the `kitpack` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and loading the optional configuration file.
//! - Executing the appropriate command and reporting errors.
//!
//! The packaging and scanning logic lives in the library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
