//! Default values for kitpack configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication. Every value here can be
//! overridden by the configuration file, and sizes also by CLI flags.

/// Name of the optional configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "kitpack.yaml";

/// Top-level path prefixes that are packaged from both trees.
pub const DEFAULT_PREFIXES: &[&str] = &[
    "templates/",
    "docs/",
    "tools/",
    "tasks/",
    "include/",
    "src/plugins/transpile/",
    "scripts/",
];

/// Informational soft size target per archive, in MiB.
pub const DEFAULT_TARGET_SIZE_MB: u64 = 230;

/// Hard per-archive cap on uncompressed bytes, in MiB.
pub const DEFAULT_HARD_CAP_MB: u64 = 300;

/// Bytes in one MiB, as used by the size flags.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Staging directory name, created under the output directory.
pub const DEFAULT_STAGE_DIR: &str = "stage_part34R";

/// Archive file name prefix; archives are `<prefix>_NN.zip`.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "umicom_studio_part34R";

pub const DEFAULT_MANIFEST_NAME: &str = "MANIFEST_PART34R.json";

pub const DEFAULT_CHANGELOG_NAME: &str = "CHANGELOG_PART34R.json";

/// Module subdirectories of `src/` whose copies win over other duplicates.
pub const DEFAULT_MODULE_DIRS: &[&str] = &["core", "build", "gui", "editor", "search", "llm"];

/// The module directory preferred over all other modules.
pub const DEFAULT_PREFERRED_MODULE: &str = "core";

/// File extensions (without the dot, compared case-insensitively) the
/// duplicate scanner considers.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["c", "h"];

/// File name patterns (case-insensitive) the duplicate scanner ignores.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["*_NOTES.C"];

pub const DUPES_REPORT_NAME: &str = "dupes_report.json";

pub const DELETE_CANDIDATES_NAME: &str = "delete_candidates.txt";

/// Convert a size in MiB to bytes, saturating instead of overflowing.
pub fn mb_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(BYTES_PER_MB)
}

/// Owned copy of a `&[&str]` default list.
pub fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mb_to_bytes() {
        assert_eq!(mb_to_bytes(0), 0);
        assert_eq!(mb_to_bytes(1), 1_048_576);
        assert_eq!(mb_to_bytes(DEFAULT_HARD_CAP_MB), 314_572_800);
    }

    #[test]
    fn test_mb_to_bytes_saturates() {
        assert_eq!(mb_to_bytes(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_default_prefixes_are_directory_prefixes() {
        for prefix in DEFAULT_PREFIXES {
            assert!(prefix.ends_with('/'), "prefix {prefix:?} should end with '/'");
        }
    }

    #[test]
    fn test_preferred_module_is_a_module() {
        assert!(DEFAULT_MODULE_DIRS.contains(&DEFAULT_PREFERRED_MODULE));
    }
}
