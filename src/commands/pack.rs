//! Pack command implementation
//!
//! Runs the packaging workflow:
//! 1. Stage allow-listed repository files into a fresh staging directory
//! 2. Overlay the kit tree (no-downsize unless `--force-refactor`)
//! 3. Write size-capped zip archives from the staged tree
//! 4. Write the changelog and manifest reports

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use kitpack::config::Config;
use kitpack::defaults::mb_to_bytes;
use kitpack::output::{Marker, OutputConfig};
use kitpack::pack::{orchestrator, PackOptions, PackSummary};

/// Arguments for the pack command
#[derive(Args, Debug)]
pub struct PackArgs {
    /// Source repository root
    #[arg(long, value_name = "DIR")]
    pub repo_path: PathBuf,

    /// Kit tree laid over the repository (defaults to current directory)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub kit_path: PathBuf,

    /// Soft size target per archive in MiB; informational unless
    /// --enforce-target is set [default: 230]
    #[arg(long, value_name = "MB")]
    pub target_size_mb: Option<u64>,

    /// Hard cap on uncompressed bytes per archive, in MiB [default: 300]
    #[arg(long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    pub hard_cap_mb: Option<u64>,

    /// Output directory for archives and reports (created if absent)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Replace staged repository files with kit files regardless of size
    #[arg(long)]
    pub force_refactor: bool,

    /// Also start a new archive once the soft target is reached
    #[arg(long)]
    pub enforce_target: bool,

    /// Creation date recorded in the manifest (defaults to today, YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub created: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl PackArgs {
    /// Resolve flags over the configuration file into library options.
    pub fn to_options(&self, config: &Config) -> PackOptions {
        let created = self
            .created
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

        let mut opts = PackOptions::new(
            &self.repo_path,
            &self.kit_path,
            &self.out,
            created,
            &config.pack,
        );
        if let Some(mb) = self.target_size_mb {
            opts.target_size = mb_to_bytes(mb);
        }
        if let Some(mb) = self.hard_cap_mb {
            opts.hard_cap = mb_to_bytes(mb);
        }
        opts.force_replace = self.force_refactor;
        opts.enforce_target = self.enforce_target;
        opts
    }
}

/// Execute the pack command
pub fn execute(args: PackArgs, config: &Config, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    let opts = args.to_options(config);

    if !args.quiet {
        println!(
            "{} Packaging {} with kit {}",
            output.marker(Marker::Working),
            opts.repo_root.display(),
            opts.kit_root.display()
        );
        if opts.force_replace {
            println!("   Force replace enabled: kit files always win");
        }
    }

    match orchestrator::execute(&opts) {
        Ok(summary) => {
            if !args.quiet {
                print_summary(&summary, &opts, output, start_time);
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Pack failed", output.marker(Marker::Failure));
            }
            Err(e.into())
        }
    }
}

fn print_summary(
    summary: &PackSummary,
    opts: &PackOptions,
    output: &OutputConfig,
    start_time: Instant,
) {
    println!(
        "{} Packed in {:.2}s",
        output.marker(Marker::Success),
        start_time.elapsed().as_secs_f64()
    );
    println!(
        "   {} repository files staged, {} kit files considered",
        summary.manifest.files.len(),
        summary.changelog.len()
    );

    for archive in &summary.archives {
        let name = archive
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "{} {} ({} files, {} bytes)",
            output.marker(Marker::Archive),
            name,
            archive.entries.len(),
            archive.total_bytes
        );
    }
    for report in [&opts.names.changelog, &opts.names.manifest] {
        println!("{} {}", output.marker(Marker::Report), report);
    }
    println!("Parts written to {}", opts.out_dir.display());
}
