//! Step 1: Staging
//!
//! Clears the staging directory and copies every repository file under an
//! allowed prefix into it, at the same relative path. Files are visited in
//! sorted relative-path order so the manifest is reproducible. Modification
//! times are carried over to the copies.

use std::path::Path;

use crate::error::Result;
use crate::filesystem::{copy_preserving, list_files, reset_dir};
use crate::path::PathFilter;

use super::report::{FileOrigin, ManifestEntry};

/// Execute the staging step.
///
/// `stage_dir` is removed and recreated before anything is copied. If it
/// lies inside `repo_root` its subtree is not walked.
pub fn execute(
    repo_root: &Path,
    stage_dir: &Path,
    filter: &PathFilter,
) -> Result<Vec<ManifestEntry>> {
    reset_dir(stage_dir)?;

    let mut entries = Vec::new();
    for file in list_files(repo_root, Some(stage_dir))? {
        if !filter.allows(&file.rel) {
            continue;
        }

        let bytes = copy_preserving(&file.path, &stage_dir.join(&file.rel))?;
        log::debug!("staged {} ({} bytes)", file.rel, bytes);

        entries.push(ManifestEntry {
            src: FileOrigin::Repo,
            rel: file.rel,
            bytes,
        });
    }

    log::info!(
        "staged {} repository files into {}",
        entries.len(),
        stage_dir.display()
    );
    Ok(entries)
}
