//! # Packaging Workflow
//!
//! `kitpack pack` assembles a curated subset of a source repository, lays a
//! secondary "kit" tree over it, and splits the result into size-capped zip
//! archives. It runs as a strictly linear sequence of steps:
//!
//! 1.  **Stage** ([`stage`]): clear the staging directory and copy every repo
//!     file under an allowed prefix into it, recording the manifest.
//! 2.  **Overlay** ([`overlay`]): merge the kit tree into staging under the
//!     no-downsize rule, recording one changelog entry per kit file.
//! 3.  **Chunk** ([`chunk`]): walk staging in sorted order and write zip
//!     archives, starting a new one whenever the hard cap would be exceeded.
//! 4.  **Report** ([`report`]): write the manifest and changelog as JSON.
//!
//! [`orchestrator::execute`] drives the steps and tracks the [`PackPhase`]
//! reached, so a failure reports exactly how far the run got. There is no
//! cleanup on failure: staging and any archives already written stay on disk.

pub mod chunk;
pub mod orchestrator;
pub mod overlay;
pub mod report;
pub mod stage;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::PackSettings;
use crate::defaults::mb_to_bytes;
use crate::path::PathFilter;

pub use chunk::{ArchiveSummary, ChunkPolicy};
pub use orchestrator::PackSummary;
pub use report::{ChangelogEntry, FileOrigin, Manifest, ManifestEntry, OverlayAction};

/// Linear workflow state. Each variant names the last step that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PackPhase {
    Init,
    Staged,
    Merged,
    Chunked,
    Reported,
    Done,
}

impl PackPhase {
    /// The phase that follows this one; `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            PackPhase::Init => PackPhase::Staged,
            PackPhase::Staged => PackPhase::Merged,
            PackPhase::Merged => PackPhase::Chunked,
            PackPhase::Chunked => PackPhase::Reported,
            PackPhase::Reported | PackPhase::Done => PackPhase::Done,
        }
    }
}

impl fmt::Display for PackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackPhase::Init => "INIT",
            PackPhase::Staged => "STAGED",
            PackPhase::Merged => "MERGED",
            PackPhase::Chunked => "CHUNKED",
            PackPhase::Reported => "REPORTED",
            PackPhase::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// File and directory names produced under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub stage_dir: String,
    pub archive_prefix: String,
    pub manifest: String,
    pub changelog: String,
}

impl ArtifactNames {
    /// Archive file name for a 1-based index: `<prefix>_01.zip`.
    pub fn archive_file(&self, index: usize) -> String {
        format!("{}_{:02}.zip", self.archive_prefix, index)
    }
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self::from(&PackSettings::default())
    }
}

impl From<&PackSettings> for ArtifactNames {
    fn from(settings: &PackSettings) -> Self {
        Self {
            stage_dir: settings.stage_dir.clone(),
            archive_prefix: settings.archive_prefix.clone(),
            manifest: settings.manifest.clone(),
            changelog: settings.changelog.clone(),
        }
    }
}

/// Everything one packaging run needs.
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Source repository root
    pub repo_root: PathBuf,
    /// Kit tree root laid over the repository
    pub kit_root: PathBuf,
    /// Output directory for archives, reports and staging
    pub out_dir: PathBuf,
    /// Soft size target in bytes
    pub target_size: u64,
    /// Hard per-archive cap in bytes
    pub hard_cap: u64,
    /// Replace staged files with kit files regardless of size
    pub force_replace: bool,
    /// Treat the soft target as a split point
    pub enforce_target: bool,
    /// Creation stamp written into the manifest
    pub created: String,
    pub filter: PathFilter,
    pub names: ArtifactNames,
}

impl PackOptions {
    /// Options with sizes, prefixes and names taken from `settings`.
    pub fn new(
        repo_root: impl Into<PathBuf>,
        kit_root: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        created: impl Into<String>,
        settings: &PackSettings,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            kit_root: kit_root.into(),
            out_dir: out_dir.into(),
            target_size: mb_to_bytes(settings.target_size_mb),
            hard_cap: mb_to_bytes(settings.hard_cap_mb),
            force_replace: false,
            enforce_target: false,
            created: created.into(),
            filter: PathFilter::new(settings.prefixes.iter().cloned()),
            names: ArtifactNames::from(settings),
        }
    }

    pub fn chunk_policy(&self) -> ChunkPolicy {
        ChunkPolicy {
            target_size: self.target_size,
            hard_cap: self.hard_cap,
            enforce_target: self.enforce_target,
        }
    }

    pub fn stage_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(&self.names.stage_dir)
    }
}
