//! CLI argument parsing for h2h

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use crate::fieldmap::Direction;

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV: &str = "H2H_LOG_DIR";

const LONG_ABOUT: &str = "h2h converts Markdown front matter between Hexo and Hugo conventions.
It can be used to migrate a Hexo blog to Hugo or a Hugo blog to Hexo.
Every Markdown file under the source directory is converted and written to the
same relative path under the destination directory; document bodies are kept as-is.

By default, it converts from Hexo to Hugo format using YAML.";

/// h2h - Hexo/Hugo front matter converter
#[derive(Parser, Debug)]
#[command(name = "h2h")]
#[command(author, version, about = "Convert between Hexo and Hugo front matter", long_about = LONG_ABOUT)]
#[command(after_help = "Logs are written to: ~/.local/share/h2h/logs/h2h.log (override with H2H_LOG_DIR)")]
pub struct Cli {
    /// Source directory containing Markdown files to convert
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Destination directory for converted Markdown files
    #[arg(long, value_name = "DIR")]
    pub dst: PathBuf,

    /// Target front matter format
    #[arg(short, long, value_parser = ["yaml", "toml"])]
    pub format: Option<String>,

    /// Format of the existing front matter
    #[arg(long, value_parser = ["yaml", "toml"])]
    pub source_format: Option<String>,

    /// Conversion direction
    #[arg(short, long, value_enum)]
    pub direction: Option<Direction>,

    /// Only convert files whose name ends with this (default: .md)
    #[arg(short, long = "ext", value_name = "SUFFIX")]
    pub extension: Option<String>,

    /// Maximum number of files converted at once (default: 4)
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log level requested on the command line, if any
    pub fn requested_log_level(&self) -> Option<String> {
        match (&self.log_level, self.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        }
    }
}

/// Where the log file is written
pub fn get_log_path() -> PathBuf {
    let dir = match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("h2h")
            .join("logs"),
    };
    let path = dir.join("h2h.log");
    debug!(?path, "get_log_path: returning path");
    path
}
