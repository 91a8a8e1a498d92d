//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_repo_file("templates/a.txt", "0123456789")
//!     .with_kit_file("templates/b.txt", "bbbbb");
//! fixture.pack_command().assert().success();
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{read_archive, read_json, ArchiveEntry};
    pub use super::TestFixture;
}

/// A temporary workspace with `repo/`, `kit/` and `out/` directories.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with empty repo and kit trees.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir.child("repo").create_dir_all().expect("Failed to create repo");
        temp_dir.child("kit").create_dir_all().expect("Failed to create kit");
        Self { temp_dir }
    }

    /// Add a file to the source repository tree.
    pub fn with_repo_file(self, path: &str, content: &str) -> Self {
        self.write(&format!("repo/{path}"), content.as_bytes())
    }

    /// Add a file to the kit tree.
    pub fn with_kit_file(self, path: &str, content: &str) -> Self {
        self.write(&format!("kit/{path}"), content.as_bytes())
    }

    /// Add a file of `size` copies of `byte` to the repository tree.
    #[allow(dead_code)]
    pub fn with_repo_bytes(self, path: &str, byte: u8, size: usize) -> Self {
        self.write(&format!("repo/{path}"), &vec![byte; size])
    }

    /// Add a file anywhere below the fixture root.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.write(path, content.as_bytes())
    }

    fn write(self, path: &str, content: &[u8]) -> Self {
        self.temp_dir
            .child(path)
            .write_binary(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repo(&self) -> PathBuf {
        self.path().join("repo")
    }

    pub fn kit(&self) -> PathBuf {
        self.path().join("kit")
    }

    pub fn out(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Paths of all archives in `out/`, sorted by name.
    #[allow(dead_code)]
    pub fn archives(&self) -> Vec<PathBuf> {
        let mut archives: Vec<PathBuf> = std::fs::read_dir(self.out())
            .map(|rd| {
                rd.filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|x| x == "zip"))
                    .collect()
            })
            .unwrap_or_default();
        archives.sort();
        archives
    }

    /// A `kitpack` command running in the fixture root.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kitpack");
        cmd.current_dir(self.path())
            .env_remove("KITPACK_CONFIG")
            .arg("--color")
            .arg("never");
        cmd
    }

    /// `kitpack pack` with repo, kit, out and a fixed creation date.
    pub fn pack_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("pack")
            .arg("--repo-path")
            .arg(self.repo())
            .arg("--kit-path")
            .arg(self.kit())
            .arg("--out")
            .arg(self.out())
            .arg("--created")
            .arg("2025-10-02");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry read back from a zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub content: Vec<u8>,
}

/// Read every entry of an archive, in stored order.
#[allow(dead_code)]
pub fn read_archive(path: &Path) -> Vec<ArchiveEntry> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).expect("Failed to read entry");
            let mut content = Vec::new();
            entry.read_to_end(&mut content).expect("Failed to read entry data");
            ArchiveEntry {
                name: entry.name().to_string(),
                content,
            }
        })
        .collect()
}

/// Parse a JSON file.
#[allow(dead_code)]
pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&text).expect("Invalid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_trees() {
        let fixture = TestFixture::new();
        assert!(fixture.repo().is_dir());
        assert!(fixture.kit().is_dir());
        assert!(!fixture.out().exists());
    }

    #[test]
    fn test_fixture_with_files() {
        let fixture = TestFixture::new()
            .with_repo_file("docs/a.md", "a")
            .with_kit_file("docs/b.md", "b");
        assert!(fixture.repo().join("docs/a.md").exists());
        assert!(fixture.kit().join("docs/b.md").exists());
    }
}
