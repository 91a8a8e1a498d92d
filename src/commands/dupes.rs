//! Dupes command implementation
//!
//! Scans `<root>/src` for `.c`/`.h` files sharing a basename, keeps the best
//! placed copy of each and writes `dupes_report.json` plus
//! `delete_candidates.txt` under `<root>/tools`. Nothing is deleted.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kitpack::config::Config;
use kitpack::defaults::{DELETE_CANDIDATES_NAME, DUPES_REPORT_NAME};
use kitpack::dupes::{self, Taxonomy};
use kitpack::output::{Marker, OutputConfig};

/// Arguments for the dupes command
#[derive(Args, Debug)]
pub struct DupesArgs {
    /// Repository root
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Source tree to scan (defaults to <root>/src)
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Directory for the reports (defaults to <root>/tools)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the dupes command
pub fn execute(args: DupesArgs, config: &Config, output: &OutputConfig) -> Result<()> {
    let root = fs::canonicalize(&args.root)
        .with_context(|| format!("Repository root not found: {}", args.root.display()))?;
    let src = args.src.clone().unwrap_or_else(|| root.join("src"));
    let out = args.out.clone().unwrap_or_else(|| root.join("tools"));

    let taxonomy = Taxonomy::from_settings(&config.dupes)?;
    let result = dupes::scan(&root, &src, &taxonomy)?;

    fs::create_dir_all(&out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;
    let report_path = out.join(DUPES_REPORT_NAME);
    let list_path = out.join(DELETE_CANDIDATES_NAME);
    let candidates = result.delete_candidates();
    dupes::write_report(&report_path, &result)?;
    dupes::write_delete_list(&list_path, &candidates)?;

    if !args.quiet {
        println!(
            "{} Scan complete. {} duplicate basenames found.",
            output.marker(Marker::Success),
            result.groups.len()
        );
        println!(" - Report: {}", report_path.display());
        println!(" - Delete list: {}", list_path.display());
        if candidates.is_empty() {
            println!("No deletion candidates detected.");
        } else {
            println!(
                "Proposed to delete {} files (keep best match per group).",
                candidates.len()
            );
        }
    }

    Ok(())
}
