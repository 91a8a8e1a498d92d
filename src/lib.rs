//! # kitpack
//!
//! Library behind the `kitpack` command-line tool: two offline utilities for
//! preparing a source tree for distribution.
//!
//! ## Quick Example
//!
//! ```no_run
//! use kitpack::config::PackSettings;
//! use kitpack::pack::{orchestrator, PackOptions};
//!
//! let opts = PackOptions::new("../studio", ".", "dist", "2025-10-02", &PackSettings::default());
//! let summary = orchestrator::execute(&opts)?;
//! println!("{} archives", summary.archives.len());
//! # Ok::<(), kitpack::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Packaging (`pack`)**: stage an allow-listed subset of a repository,
//!   overlay a kit tree with the no-downsize rule, and split the result into
//!   zip archives under a hard per-archive byte cap, with a JSON manifest and
//!   changelog.
//! - **Duplicate scanning (`dupes`)**: group `.c`/`.h` sources by basename
//!   and propose which copies to delete, preferring module directories.
//! - **Path filtering (`path`)**: the prefix allow-list shared by both trees.
//! - **Configuration (`config`, `defaults`)**: optional `kitpack.yaml` over
//!   built-in defaults.
//!
//! Both utilities are single-threaded, single-pass batch jobs. Any error is
//! fatal and nothing is cleaned up on failure.

pub mod config;
pub mod defaults;
pub mod dupes;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod pack;
pub mod path;

#[cfg(test)]
mod chunk_proptest;
