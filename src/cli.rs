//! Command-line interface parsing for timein
//!
//! This module handles parsing of CLI arguments using clap: the free-text place
//! query, the output format, and cache maintenance flags.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use directories::ProjectDirs;

/// timein - Current local time for any city or landmark
#[derive(Parser, Debug)]
#[command(name = "timein")]
#[command(about = "Look up the current local time for a city or landmark")]
#[command(version)]
pub struct Cli {
    /// City or landmark to look up
    ///
    /// Examples:
    ///   timein Bangkok
    ///   timein New York City
    #[arg(value_name = "PLACE")]
    pub query: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Directory for the timezone cache snapshot
    ///
    /// Defaults to the XDG cache directory (`~/.cache/timein/` on Linux).
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Empty the timezone cache and exit
    #[arg(long)]
    pub clear_cache: bool,
}

/// Supported output renderings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text on stdout, errors on stderr
    Plain,
    /// Alfred Script Filter JSON
    Alfred,
}

impl Cli {
    /// The place query with multiple words joined back together
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }

    /// The directory holding the cache snapshot
    ///
    /// `--cache-dir` wins; otherwise the XDG cache directory; the current
    /// directory is the last resort when no home directory exists.
    pub fn resolve_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .or_else(|| {
                ProjectDirs::from("", "", "timein").map(|dirs| dirs.cache_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
