//! Step 2: Kit Overlay
//!
//! Lays the kit tree over the staged repository files. For every kit file
//! under an allowed prefix (zip files excluded):
//!
//! - nothing staged at that path: copy it in, `ADDED`;
//! - kit file at least as large as the staged one, or `force` set: overwrite,
//!   `REPLACED`;
//! - otherwise leave the staged repository copy alone, `KEPT_REPO`.
//!
//! The no-downsize rule keeps a kit from silently shrinking a richer
//! repository file unless the operator forces it.

use std::path::Path;

use crate::error::Result;
use crate::filesystem::{copy_preserving, file_size, list_files};
use crate::path::PathFilter;

use super::report::{ChangelogEntry, OverlayAction};

/// Decide what to do with one kit file.
///
/// `staged_size` is `None` when nothing is staged at the path yet.
pub fn decide(kit_size: u64, staged_size: Option<u64>, force: bool) -> OverlayAction {
    match staged_size {
        None => OverlayAction::Added,
        Some(staged) if force || kit_size >= staged => OverlayAction::Replaced,
        Some(_) => OverlayAction::KeptRepo,
    }
}

/// Execute the overlay step, returning one changelog entry per kit file
/// considered, in sorted relative-path order.
pub fn execute(
    kit_root: &Path,
    stage_dir: &Path,
    filter: &PathFilter,
    force: bool,
) -> Result<Vec<ChangelogEntry>> {
    let mut changelog = Vec::new();

    for file in list_files(kit_root, Some(stage_dir))? {
        if is_zip(&file.path) || !filter.allows(&file.rel) {
            continue;
        }

        let dest = stage_dir.join(&file.rel);
        let staged_size = if dest.is_file() {
            Some(file_size(&dest)?)
        } else {
            None
        };

        let action = decide(file.size, staged_size, force);
        match action {
            OverlayAction::Added | OverlayAction::Replaced => {
                copy_preserving(&file.path, &dest)?;
            }
            OverlayAction::KeptRepo => {}
        }

        log::info!(
            "{:?} {} (kit {} bytes, staged {})",
            action,
            file.rel,
            file.size,
            staged_size.map_or_else(|| "-".to_string(), |s| format!("{s} bytes"))
        );
        changelog.push(ChangelogEntry {
            action,
            rel: file.rel,
        });
    }

    Ok(changelog)
}

fn is_zip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zip")
}
