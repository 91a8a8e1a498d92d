//! Step 3: Archive Chunking
//!
//! Splits the staged tree into a sequence of zip archives. Planning is pure:
//! [`plan`] takes the sorted file list and sizes and decides where each
//! archive ends. [`execute`] then writes each planned chunk through an
//! [`ArchiveWriter`], which owns the open zip and is always finalized before
//! the next archive is opened.
//!
//! The hard cap is enforced at file granularity: a new archive starts when
//! adding the next file to a non-empty archive would push its uncompressed
//! total over the cap. Files are never split, so a single file larger than
//! the cap sits alone in its archive and exceeds the cap.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::filesystem::{list_files, TreeFile};

use super::ArtifactNames;

/// Size limits for chunk planning, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Soft target; only consulted when `enforce_target` is set.
    pub target_size: u64,
    /// Hard cap on the uncompressed total of one archive.
    pub hard_cap: u64,
    /// Start a new archive once the current one has reached `target_size`.
    pub enforce_target: bool,
}

/// A planned archive: a contiguous run of the sorted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based archive index
    pub index: usize,
    /// Range of positions in the planned file list
    pub start: usize,
    pub end: usize,
    /// Uncompressed byte total
    pub total_bytes: u64,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An archive written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub index: usize,
    pub path: PathBuf,
    /// Entry names in write order
    pub entries: Vec<String>,
    /// Uncompressed byte total
    pub total_bytes: u64,
}

/// Plan archive boundaries over files of the given sizes, in order.
///
/// Archives are created lazily: an empty input yields no chunks.
pub fn plan(sizes: &[u64], policy: ChunkPolicy) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Chunk {
        index: 1,
        start: 0,
        end: 0,
        total_bytes: 0,
    };

    for (pos, &size) in sizes.iter().enumerate() {
        if !current.is_empty() && needs_new_archive(current.total_bytes, size, policy) {
            let next = Chunk {
                index: current.index + 1,
                start: pos,
                end: pos,
                total_bytes: 0,
            };
            chunks.push(std::mem::replace(&mut current, next));
        }
        current.end = pos + 1;
        current.total_bytes = current.total_bytes.saturating_add(size);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn needs_new_archive(current_total: u64, next_size: u64, policy: ChunkPolicy) -> bool {
    if current_total.saturating_add(next_size) > policy.hard_cap {
        return true;
    }
    policy.enforce_target && current_total >= policy.target_size
}

/// An open zip archive being filled. Finalized by [`ArchiveWriter::finish`],
/// or on drop if an error unwinds past it.
pub struct ArchiveWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    entries: Vec<String>,
    total_bytes: u64,
}

impl ArchiveWriter {
    /// Create (or truncate) the archive at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            entries: Vec::new(),
            total_bytes: 0,
        })
    }

    /// Deflate `source` into the archive under `name`.
    pub fn add_file(&mut self, source: &Path, name: &str, size: u64) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(size >= u64::from(u32::MAX));

        self.zip
            .start_file(name, options)
            .map_err(|e| Error::archive(&self.path, e))?;
        let mut input = File::open(source).map_err(|e| Error::io(source, e))?;
        io::copy(&mut input, &mut self.zip).map_err(|e| Error::io(&self.path, e))?;

        self.entries.push(name.to_string());
        self.total_bytes = self.total_bytes.saturating_add(size);
        Ok(())
    }

    /// Write the central directory and close the archive.
    pub fn finish(self, index: usize) -> Result<ArchiveSummary> {
        let ArchiveWriter {
            path,
            zip,
            entries,
            total_bytes,
        } = self;
        zip.finish().map_err(|e| Error::archive(&path, e))?;
        Ok(ArchiveSummary {
            index,
            path,
            entries,
            total_bytes,
        })
    }
}

/// Execute the chunking step over the staged tree.
pub fn execute(
    stage_dir: &Path,
    out_dir: &Path,
    names: &ArtifactNames,
    policy: ChunkPolicy,
) -> Result<Vec<ArchiveSummary>> {
    let files = list_files(stage_dir, None)?;
    if files.is_empty() {
        log::warn!("staging directory {} is empty; no archives written", stage_dir.display());
        return Ok(Vec::new());
    }

    let sizes: Vec<u64> = files.iter().map(|f| f.size).collect();
    let chunks = plan(&sizes, policy);

    let mut archives = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        archives.push(write_chunk(chunk, &files[chunk.start..chunk.end], out_dir, names, policy)?);
    }
    Ok(archives)
}

fn write_chunk(
    chunk: &Chunk,
    files: &[TreeFile],
    out_dir: &Path,
    names: &ArtifactNames,
    policy: ChunkPolicy,
) -> Result<ArchiveSummary> {
    let path = out_dir.join(names.archive_file(chunk.index));
    let mut writer = ArchiveWriter::create(&path)?;
    for file in files {
        writer.add_file(&file.path, &file.rel, file.size)?;
    }

    if chunk.total_bytes > policy.hard_cap {
        log::warn!(
            "{} holds {} bytes, over the {} byte cap (single oversized file)",
            path.display(),
            chunk.total_bytes,
            policy.hard_cap
        );
    }
    log::info!(
        "wrote {} ({} entries, {} bytes uncompressed)",
        path.display(),
        chunk.len(),
        chunk.total_bytes
    );
    writer.finish(chunk.index)
}
