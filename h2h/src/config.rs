//! h2h configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{BatchConfig, DEFAULT_EXTENSION, DEFAULT_MAX_CONCURRENCY};
use crate::cli::Cli;
use crate::codec::YAML;
use crate::fieldmap::Direction;

/// Project-local config file name
pub const LOCAL_CONFIG: &str = ".h2h.yml";

/// Main h2h configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Format of the existing front matter
    pub source_format: String,

    /// Format to write front matter in
    pub target_format: String,

    /// Suffix selecting files to convert
    pub file_extension: String,

    /// Maximum number of files converted at once
    pub max_concurrency: usize,

    /// Conversion direction
    pub direction: Direction,

    /// Log level when none is given on the command line
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_format: YAML.to_string(),
            target_format: YAML.to_string(),
            file_extension: DEFAULT_EXTENSION.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            direction: Direction::HexoToHugo,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `./.h2h.yml`, then `~/.config/h2h/h2h.yml`, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed here; the full `load` reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };

        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("h2h").join("h2h.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Override file settings with whatever was given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(format) = &cli.source_format {
            self.source_format = format.clone();
        }
        if let Some(format) = &cli.format {
            self.target_format = format.clone();
        }
        if let Some(ext) = &cli.extension {
            self.file_extension = ext.clone();
        }
        if let Some(n) = cli.concurrency {
            self.max_concurrency = n;
        }
        if let Some(direction) = cli.direction {
            self.direction = direction;
        }
        if let Some(level) = cli.requested_log_level() {
            self.log_level = Some(level);
        }
    }

    /// Settings for the batch engine
    pub fn to_batch_config(&self) -> BatchConfig {
        BatchConfig {
            source_format: self.source_format.clone(),
            target_format: self.target_format.clone(),
            file_extension: self.file_extension.clone(),
            max_concurrency: self.max_concurrency,
            direction: self.direction,
        }
    }
}
