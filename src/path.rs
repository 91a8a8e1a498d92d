//! Path manipulation utilities for kitpack

use std::path::{Component, Path};

use crate::defaults::DEFAULT_PREFIXES;
use crate::error::{Error, Result};

/// Allow-list of top-level path prefixes.
///
/// A relative, posix-formatted path is allowed iff it starts with any of the
/// prefixes. Plain string prefix matching: no `..` resolution, no separator
/// normalization, so `docs` also admits `docs-old/x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    prefixes: Vec<String>,
}

impl PathFilter {
    /// Create a filter from a list of prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true iff `rel` starts with any allowed prefix.
    pub fn allows(&self, rel: &str) -> bool {
        self.prefixes.iter().any(|p| rel.starts_with(p.as_str()))
    }

    /// Convenience for filesystem paths; converts to posix form first.
    pub fn allows_path(&self, rel: &Path) -> bool {
        self.allows(&to_posix(rel))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().copied())
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_posix(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip `root` from `path`, failing with a path error if it is not below it.
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> Result<&'a Path> {
    path.strip_prefix(root).map_err(|_| Error::Path {
        message: format!(
            "'{}' is not under '{}'",
            path.display(),
            root.display()
        ),
    })
}
