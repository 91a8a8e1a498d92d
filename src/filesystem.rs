//! Host filesystem helpers shared by the packaging steps and the scanner

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::path::{relative_to, to_posix};

/// A regular file found under a walked root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the walked root, posix formatted
    pub rel: String,
    /// Size in bytes at walk time
    pub size: u64,
}

/// List every regular file below `root`, sorted component by component on
/// the relative path (`docs/a/x.md` before `docs/a-b.md`).
///
/// A symlink to a regular file is listed under its own path. Symlinked
/// directories are not descended into. When `skip` is given and lies inside
/// `root`, its whole subtree is left out of the walk.
pub fn list_files(root: &Path, skip: Option<&Path>) -> Result<Vec<TreeFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| match skip {
            Some(skip) => e.depth() == 0 || e.path() != skip,
            None => true,
        })
    {
        let entry = entry?;
        if !is_file_entry(&entry) {
            continue;
        }

        let rel = to_posix(relative_to(entry.path(), root)?);
        let size = file_size(entry.path())?;

        files.push(TreeFile {
            path: entry.path().to_path_buf(),
            rel,
            size,
        });
    }

    files.sort_by(|a, b| Path::new(&a.rel).cmp(Path::new(&b.rel)));
    Ok(files)
}

/// Whether a walked entry is a regular file, or a symlink resolving to one.
pub fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Delete `dir` if it exists and create it again, empty.
pub fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Copy `src` over `dest`, creating parent directories and carrying over the
/// modification time. Returns the size of the written copy.
pub fn copy_preserving(src: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::copy(src, dest).map_err(|e| Error::io(src, e))?;

    let meta = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_mtime(dest, mtime).map_err(|e| Error::io(dest, e))?;

    file_size(dest)
}

/// Byte size of a file.
pub fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::io(path, e))
}

/// Canonicalize a directory, turning a missing one into a path-tagged error.
pub fn canonical_dir(dir: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(dir).map_err(|e| Error::io(dir, e))?;
    if !canonical.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }
    Ok(canonical)
}
