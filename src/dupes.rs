//! # Duplicate Source Scanner
//!
//! Finds C sources that exist under the same basename in more than one place
//! below a `src/` tree, and proposes which copies to delete. Only filenames
//! are compared; contents are never read.
//!
//! Each copy is placed in a category by its first path component below
//! `src/`: the preferred module (`core`), another known module directory, or
//! anything else (top-level files and unknown subdirectories). The copy that
//! sorts first under [`KeepRank`] is kept; every other copy in the group is a
//! delete candidate. The scanner only writes reports and never deletes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::DupesSettings;
use crate::error::{Error, Result};
use crate::filesystem::is_file_entry;
use crate::path::relative_to;

/// Where a source file sits below `src/`, from most to least preferred.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Placement {
    /// Inside the preferred module directory
    PreferredModule,
    /// Inside another module directory, ranked by its name
    Module(String),
    /// Top-level file or a non-module subdirectory
    Other,
}

/// Total order over duplicate copies; the minimum is kept.
///
/// Placement first, then the full path as a tie-breaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepRank {
    pub placement: Placement,
    pub path: PathBuf,
}

impl Ord for KeepRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.placement
            .cmp(&other.placement)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for KeepRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scanner rules derived from [`DupesSettings`].
#[derive(Debug, Clone)]
pub struct Taxonomy {
    module_dirs: Vec<String>,
    preferred_module: String,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl Taxonomy {
    pub fn from_settings(settings: &DupesSettings) -> Result<Self> {
        let exclude = settings
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            module_dirs: settings.module_dirs.clone(),
            preferred_module: settings.preferred_module.clone(),
            extensions: settings
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exclude,
        })
    }

    /// Whether a file name is a source the scanner looks at.
    pub fn is_source(&self, file_name: &str) -> bool {
        let ext = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return false,
        };
        if !self.extensions.contains(&ext) {
            return false;
        }

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        !self
            .exclude
            .iter()
            .any(|p| p.matches_with(file_name, options))
    }

    /// Categorize a path relative to the `src/` root.
    pub fn placement(&self, rel: &Path) -> Placement {
        let mut components = rel.components();
        let first = components.next();
        // A single component is a file directly in src/.
        if components.next().is_none() {
            return Placement::Other;
        }

        let dir = match first {
            Some(c) => c.as_os_str().to_string_lossy().into_owned(),
            None => return Placement::Other,
        };
        if !self.module_dirs.contains(&dir) {
            Placement::Other
        } else if dir == self.preferred_module {
            Placement::PreferredModule
        } else {
            Placement::Module(dir)
        }
    }

    pub fn rank(&self, src_root: &Path, path: &Path) -> Result<KeepRank> {
        Ok(KeepRank {
            placement: self.placement(relative_to(path, src_root)?),
            path: path.to_path_buf(),
        })
    }
}

/// One basename found in more than one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub basename: String,
    /// All copies, sorted by path
    pub paths: Vec<PathBuf>,
    pub keep: PathBuf,
}

impl DuplicateGroup {
    /// Every copy except the kept one.
    pub fn delete_candidates(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter().filter(move |p| **p != self.keep)
    }
}

/// Outcome of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub root: PathBuf,
    pub src: PathBuf,
    /// Duplicate groups, sorted by basename
    pub groups: Vec<DuplicateGroup>,
}

impl ScanResult {
    pub fn delete_candidates(&self) -> Vec<PathBuf> {
        self.groups
            .iter()
            .flat_map(|g| g.delete_candidates().cloned())
            .collect()
    }
}

#[derive(Serialize)]
struct DupesReport<'a> {
    root: String,
    src: String,
    dupes: BTreeMap<&'a str, Vec<String>>,
}

/// Scan `src_root` for duplicate basenames. `root` is only recorded in the
/// report.
pub fn scan(root: &Path, src_root: &Path, taxonomy: &Taxonomy) -> Result<ScanResult> {
    if !src_root.is_dir() {
        return Err(Error::SourceNotFound {
            path: src_root.to_path_buf(),
        });
    }

    let mut by_base: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(src_root) {
        let entry = entry?;
        if !is_file_entry(&entry) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if taxonomy.is_source(&name) {
            by_base.entry(name).or_default().push(entry.into_path());
        }
    }

    let mut groups = Vec::new();
    for (basename, mut paths) in by_base {
        if paths.len() < 2 {
            continue;
        }
        paths.sort();

        let mut ranks = paths
            .iter()
            .map(|p| taxonomy.rank(src_root, p))
            .collect::<Result<Vec<_>>>()?;
        ranks.sort();
        let keep = ranks.swap_remove(0).path;

        log::debug!("{basename}: keeping {}", keep.display());
        groups.push(DuplicateGroup {
            basename,
            paths,
            keep,
        });
    }

    Ok(ScanResult {
        root: root.to_path_buf(),
        src: src_root.to_path_buf(),
        groups,
    })
}

/// Write `dupes_report.json`-style output: root, src, and every group.
pub fn write_report(path: &Path, result: &ScanResult) -> Result<()> {
    let report = DupesReport {
        root: result.root.display().to_string(),
        src: result.src.display().to_string(),
        dupes: result
            .groups
            .iter()
            .map(|g| {
                (
                    g.basename.as_str(),
                    g.paths.iter().map(|p| p.display().to_string()).collect(),
                )
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Write the newline-separated delete list; empty file when there is none.
pub fn write_delete_list(path: &Path, candidates: &[PathBuf]) -> Result<()> {
    let mut text = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    if !candidates.is_empty() {
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| Error::io(path, e))
}
