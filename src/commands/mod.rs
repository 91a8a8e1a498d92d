//! # CLI Command Implementations
//!
//! Each subcommand of `kitpack` lives in its own module with:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `kitpack` library to do the work.

pub mod completions;
pub mod dupes;
pub mod pack;
