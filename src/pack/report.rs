//! Manifest and changelog records, and their JSON serialization.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where a manifest entry was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOrigin {
    Repo,
}

/// One file copied from the repository into staging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub src: FileOrigin,
    pub rel: String,
    pub bytes: u64,
}

/// All files staged from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub created: String,
    pub files: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(created: impl Into<String>) -> Self {
        Self {
            created: created.into(),
            files: Vec::new(),
        }
    }

    /// Sum of all staged repository bytes.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// What the overlay did with one kit file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayAction {
    /// No staged copy existed; the kit file was copied in.
    Added,
    /// The kit file overwrote the staged copy.
    Replaced,
    /// The staged repository copy was larger and kept.
    KeptRepo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub action: OverlayAction,
    pub rel: String,
}

/// Write the manifest as pretty-printed JSON.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    write_json(path, manifest)
}

/// Write the changelog as a pretty-printed JSON array.
pub fn write_changelog(path: &Path, changelog: &[ChangelogEntry]) -> Result<()> {
    write_json(path, changelog)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(Error::Json)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_json_shape() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("MANIFEST.json");
        let mut manifest = Manifest::new("2025-10-02");
        manifest.files.push(ManifestEntry {
            src: FileOrigin::Repo,
            rel: "templates/a.txt".to_string(),
            bytes: 10,
        });

        write_manifest(&path, &manifest).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "created": "2025-10-02",
                "files": [{"src": "repo", "rel": "templates/a.txt", "bytes": 10}]
            })
        );
    }

    #[test]
    fn test_changelog_json_shape() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.json");
        let changelog = vec![
            ChangelogEntry {
                action: OverlayAction::Replaced,
                rel: "templates/a.txt".to_string(),
            },
            ChangelogEntry {
                action: OverlayAction::KeptRepo,
                rel: "docs/b.md".to_string(),
            },
        ];

        write_changelog(&path, &changelog).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        // Pretty-printed, two-space indent.
        assert!(text.starts_with("[\n  {\n    \"action\": \"REPLACED\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["action"], "KEPT_REPO");
        assert_eq!(value[1]["rel"], "docs/b.md");
    }

    #[test]
    fn test_empty_changelog_is_empty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.json");
        write_changelog(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_into_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/MANIFEST.json");
        let err = write_manifest(&path, &Manifest::new("x")).unwrap_err();
        assert!(err.to_string().contains("MANIFEST.json"));
    }

    #[test]
    fn test_manifest_total_bytes() {
        let mut manifest = Manifest::new("x");
        for (rel, bytes) in [("a", 3), ("b", 4)] {
            manifest.files.push(ManifestEntry {
                src: FileOrigin::Repo,
                rel: rel.to_string(),
                bytes,
            });
        }
        assert_eq!(manifest.total_bytes(), 7);
    }
}
