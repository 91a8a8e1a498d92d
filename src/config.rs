//! # Configuration File
//!
//! `kitpack` runs with built-in defaults (see [`crate::defaults`]), but an
//! optional `kitpack.yaml` can override the packaging allow-list, artifact
//! names and size limits, and the duplicate scanner's module taxonomy.
//!
//! ```yaml
//! pack:
//!   prefixes: ["docs/", "templates/"]
//!   hard_cap_mb: 100
//!   archive_prefix: release_part
//! dupes:
//!   module_dirs: [core, gui]
//!   exclude_patterns: ["*_NOTES.C", "*.orig.c"]
//! ```
//!
//! Every key is optional. Command-line flags take precedence over values from
//! the file; the file takes precedence over defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    owned, DEFAULT_ARCHIVE_PREFIX, DEFAULT_CHANGELOG_NAME, DEFAULT_EXCLUDE_PATTERNS,
    DEFAULT_HARD_CAP_MB, DEFAULT_MANIFEST_NAME, DEFAULT_MODULE_DIRS, DEFAULT_PREFERRED_MODULE,
    DEFAULT_PREFIXES, DEFAULT_SOURCE_EXTENSIONS, DEFAULT_STAGE_DIR, DEFAULT_TARGET_SIZE_MB,
};
use crate::error::{Error, Result};

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings for `kitpack pack`
    pub pack: PackSettings,
    /// Settings for `kitpack dupes`
    pub dupes: DupesSettings,
}

/// Packaging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackSettings {
    /// Top-level prefixes copied from both trees.
    pub prefixes: Vec<String>,
    /// Informational soft target per archive, in MiB.
    pub target_size_mb: u64,
    /// Hard cap per archive, in MiB.
    pub hard_cap_mb: u64,
    /// Staging directory name under the output directory.
    pub stage_dir: String,
    /// Archive name prefix (`<prefix>_NN.zip`).
    pub archive_prefix: String,
    pub manifest: String,
    pub changelog: String,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            prefixes: owned(DEFAULT_PREFIXES),
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            hard_cap_mb: DEFAULT_HARD_CAP_MB,
            stage_dir: DEFAULT_STAGE_DIR.to_string(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            manifest: DEFAULT_MANIFEST_NAME.to_string(),
            changelog: DEFAULT_CHANGELOG_NAME.to_string(),
        }
    }
}

/// Duplicate scanner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DupesSettings {
    /// First-level subdirectories of `src/` considered authoritative.
    pub module_dirs: Vec<String>,
    /// The module ranked ahead of every other module.
    pub preferred_module: String,
    /// Extensions (no dot, case-insensitive) to scan.
    pub extensions: Vec<String>,
    /// File name globs (case-insensitive) to ignore.
    pub exclude_patterns: Vec<String>,
}

impl Default for DupesSettings {
    fn default() -> Self {
        Self {
            module_dirs: owned(DEFAULT_MODULE_DIRS),
            preferred_module: DEFAULT_PREFERRED_MODULE.to_string(),
            extensions: owned(DEFAULT_SOURCE_EXTENSIONS),
            exclude_patterns: owned(DEFAULT_EXCLUDE_PATTERNS),
        }
    }
}

/// Parse configuration from a YAML string
pub fn parse(yaml: &str) -> Result<Config> {
    // An empty or comment-only document deserializes as unit, not a map.
    if yaml.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    }) {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("Top-level keys are 'pack' and 'dupes'".to_string()),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file path
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content)
}

/// Load the explicit config if given, else `default_path` if it exists, else
/// built-in defaults.
pub fn load(explicit: Option<&Path>, default_path: &Path) -> Result<Config> {
    match explicit {
        Some(path) => from_file(path),
        None if default_path.is_file() => {
            log::debug!("using config file {}", default_path.display());
            from_file(default_path)
        }
        None => Ok(Config::default()),
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.pack.hard_cap_mb == 0 {
            return Err(Error::ConfigParse {
                message: "pack.hard_cap_mb must be greater than zero".to_string(),
                hint: None,
            });
        }
        if self.pack.prefixes.iter().any(|p| p.is_empty()) {
            return Err(Error::ConfigParse {
                message: "pack.prefixes contains an empty prefix".to_string(),
                hint: Some("An empty prefix would admit every file; use e.g. 'docs/'".to_string()),
            });
        }
        for name in [
            &self.pack.stage_dir,
            &self.pack.archive_prefix,
            &self.pack.manifest,
            &self.pack.changelog,
        ] {
            let dots_only = name.chars().all(|c| c == '.');
            if dots_only || name.contains('/') || name.contains('\\') {
                return Err(Error::ConfigParse {
                    message: format!("artifact name {name:?} must be a plain file name"),
                    hint: None,
                });
            }
        }
        for pattern in &self.dupes.exclude_patterns {
            glob::Pattern::new(pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_gives_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
        assert_eq!(parse("# nothing here\n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_pack_section() {
        let config = parse(
            r#"
pack:
  prefixes: ["docs/"]
  hard_cap_mb: 10
"#,
        )
        .unwrap();
        assert_eq!(config.pack.prefixes, vec!["docs/"]);
        assert_eq!(config.pack.hard_cap_mb, 10);
        assert_eq!(config.pack.target_size_mb, DEFAULT_TARGET_SIZE_MB);
        assert_eq!(config.pack.archive_prefix, DEFAULT_ARCHIVE_PREFIX);
        assert_eq!(config.dupes, DupesSettings::default());
    }

    #[test]
    fn test_parse_dupes_section() {
        let config = parse(
            r#"
dupes:
  module_dirs: [core, net]
  exclude_patterns: ["*.orig.c"]
"#,
        )
        .unwrap();
        assert_eq!(config.dupes.module_dirs, vec!["core", "net"]);
        assert_eq!(config.dupes.preferred_module, "core");
        assert_eq!(config.dupes.exclude_patterns, vec!["*.orig.c"]);
    }

    #[test]
    fn test_parse_unknown_key_rejected() {
        let err = parse("pack:\n  hard_cap: 3\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Configuration parsing error"));
        assert!(message.contains("hint:"));
    }

    #[test]
    fn test_parse_zero_hard_cap_rejected() {
        let err = parse("pack:\n  hard_cap_mb: 0\n").unwrap_err();
        assert!(err.to_string().contains("hard_cap_mb"));
    }

    #[test]
    fn test_parse_empty_prefix_rejected() {
        let err = parse("pack:\n  prefixes: ['']\n").unwrap_err();
        assert!(err.to_string().contains("empty prefix"));
    }

    #[test]
    fn test_parse_artifact_name_with_separator_rejected() {
        let err = parse("pack:\n  manifest: out/manifest.json\n").unwrap_err();
        assert!(err.to_string().contains("plain file name"));
    }

    #[test]
    fn test_parse_dot_artifact_names_rejected() {
        for field in ["stage_dir", "archive_prefix", "manifest", "changelog"] {
            for name in [".", "..", "..."] {
                let yaml = format!("pack:\n  {field}: \"{name}\"\n");
                let err = parse(&yaml).unwrap_err();
                assert!(
                    err.to_string().contains("plain file name"),
                    "{field}={name} accepted"
                );
            }
        }
    }

    #[test]
    fn test_parse_dotted_artifact_name_accepted() {
        let config = parse("pack:\n  stage_dir: .stage\n").unwrap();
        assert_eq!(config.pack.stage_dir, ".stage");
    }

    #[test]
    fn test_parse_invalid_glob_rejected() {
        let err = parse("dupes:\n  exclude_patterns: ['[abc']\n").unwrap_err();
        assert!(matches!(err, Error::Glob(_)));
    }

    #[test]
    fn test_load_precedence() {
        let temp = TempDir::new().unwrap();
        let default_path = temp.path().join("kitpack.yaml");

        // Missing default file falls back to built-ins.
        assert_eq!(load(None, &default_path).unwrap(), Config::default());

        fs::write(&default_path, "pack:\n  hard_cap_mb: 7\n").unwrap();
        assert_eq!(load(None, &default_path).unwrap().pack.hard_cap_mb, 7);

        let explicit = temp.path().join("other.yaml");
        fs::write(&explicit, "pack:\n  hard_cap_mb: 9\n").unwrap();
        assert_eq!(
            load(Some(&explicit), &default_path).unwrap().pack.hard_cap_mb,
            9
        );
    }

    #[test]
    fn test_load_missing_explicit_errors() {
        let temp = TempDir::new().unwrap();
        let err = load(
            Some(&temp.path().join("missing.yaml")),
            &temp.path().join("kitpack.yaml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
