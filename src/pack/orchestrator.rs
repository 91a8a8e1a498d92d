//! Orchestrator for the complete packaging run
//!
//! Coordinates the four steps in order and tracks the [`PackPhase`] reached:
//! `INIT -> STAGED -> MERGED -> CHUNKED -> REPORTED -> DONE`. A failing step
//! aborts the run with [`Error::PackAborted`], naming the last completed
//! phase. Nothing is rolled back.

use std::fs;

use crate::error::{Error, Result};
use crate::filesystem::canonical_dir;

use super::report::{self, ChangelogEntry, Manifest};
use super::{chunk, overlay, stage, ArchiveSummary, PackOptions, PackPhase};

/// Result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub manifest: Manifest,
    pub changelog: Vec<ChangelogEntry>,
    pub archives: Vec<ArchiveSummary>,
    pub phase: PackPhase,
}

/// Tracks the workflow phase and tags failures with it.
struct Workflow {
    phase: PackPhase,
}

impl Workflow {
    fn step<T>(&mut self, run: impl FnOnce() -> Result<T>) -> Result<T> {
        let value = run().map_err(|source| Error::PackAborted {
            completed: self.phase,
            source: Box::new(source),
        })?;
        self.phase = self.phase.next();
        log::info!("pack phase: {}", self.phase);
        Ok(value)
    }
}

/// Execute the complete packaging run.
pub fn execute(opts: &PackOptions) -> Result<PackSummary> {
    let mut flow = Workflow {
        phase: PackPhase::Init,
    };

    let (out_dir, stage_dir, manifest) = flow.step(|| {
        fs::create_dir_all(&opts.out_dir).map_err(|e| Error::io(&opts.out_dir, e))?;
        let out_dir = canonical_dir(&opts.out_dir)?;
        let repo_root = canonical_dir(&opts.repo_root)?;
        let stage_dir = opts.stage_path(&out_dir);

        let mut manifest = Manifest::new(opts.created.clone());
        manifest.files = stage::execute(&repo_root, &stage_dir, &opts.filter)?;
        Ok((out_dir, stage_dir, manifest))
    })?;

    let changelog = flow.step(|| {
        let kit_root = canonical_dir(&opts.kit_root)?;
        overlay::execute(&kit_root, &stage_dir, &opts.filter, opts.force_replace)
    })?;

    let archives =
        flow.step(|| chunk::execute(&stage_dir, &out_dir, &opts.names, opts.chunk_policy()))?;

    flow.step(|| {
        report::write_changelog(&out_dir.join(&opts.names.changelog), &changelog)?;
        report::write_manifest(&out_dir.join(&opts.names.manifest), &manifest)
    })?;

    flow.phase = flow.phase.next();
    Ok(PackSummary {
        manifest,
        changelog,
        archives,
        phase: flow.phase,
    })
}
