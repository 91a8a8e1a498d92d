//! # Output Configuration
//!
//! Controls whether CLI status lines use emoji or plain bracketed markers,
//! based on the `--color` flag and the terminal.
//!
//! In `auto` mode the following are respected:
//! - `NO_COLOR` - disables decoration when set (per https://no-color.org/)
//! - `CLICOLOR=0` - disables decoration
//! - `CLICOLOR_FORCE=1` - forces decoration even in non-TTY
//! - `TERM=dumb` - disables decoration
//!
//! ```rust,ignore
//! use kitpack::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} Packaging...", out.marker(Marker::Working));
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether emoji markers should be used.
    pub use_color: bool,
}

/// Kinds of status line a command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Working,
    Success,
    Failure,
    Archive,
    Report,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Working => "🔍",
            Marker::Success => "✅",
            Marker::Failure => "❌",
            Marker::Archive => "📦",
            Marker::Report => "📄",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Working => "[....]",
            Marker::Success => "[OK]",
            Marker::Failure => "[FAIL]",
            Marker::Archive => "[ZIP]",
            Marker::Report => "[FILE]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is `"always"`, `"never"` or anything else for auto
    /// detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The marker text for a status line.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
