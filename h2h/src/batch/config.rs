//! Batch configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::YAML;
use crate::fieldmap::Direction;

/// Default file extension selecting documents to convert
pub const DEFAULT_EXTENSION: &str = ".md";

/// Default number of concurrent conversions
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Invalid batch settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("file extension must not be empty")]
    EmptyExtension,

    #[error("format name must not be empty ({field})")]
    EmptyFormat { field: &'static str },
}

/// Settings for one batch run; read-only while the batch runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Codec used to decode existing front matter
    #[serde(default = "default_format")]
    pub source_format: String,

    /// Codec used to encode converted front matter
    #[serde(default = "default_format")]
    pub target_format: String,

    /// Only files whose name ends with this are converted
    #[serde(default = "default_extension")]
    pub file_extension: String,

    /// Upper bound on simultaneously running conversions
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default)]
    pub direction: Direction,
}

fn default_format() -> String {
    YAML.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_format: default_format(),
            target_format: default_format(),
            file_extension: default_extension(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            direction: Direction::HexoToHugo,
        }
    }
}

impl BatchConfig {
    /// Check settings before a run
    ///
    /// Format names are not checked against any registry here; an unknown
    /// format fails each file individually.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.file_extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        if self.source_format.trim().is_empty() {
            return Err(ConfigError::EmptyFormat { field: "source" });
        }
        if self.target_format.trim().is_empty() {
            return Err(ConfigError::EmptyFormat { field: "target" });
        }
        Ok(())
    }

    /// True if `file_name` passes the extension filter
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.file_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.source_format, "yaml");
        assert_eq!(config.target_format, "yaml");
        assert_eq!(config.file_extension, ".md");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.direction, Direction::HexoToHugo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = BatchConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_empty_extension_rejected() {
        let config = BatchConfig {
            file_extension: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyExtension));
    }

    #[test]
    fn test_blank_format_rejected() {
        let config = BatchConfig {
            target_format: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyFormat { field: "target" }));
    }

    #[test]
    fn test_extension_filter() {
        let config = BatchConfig::default();
        assert!(config.matches("post.md"));
        assert!(config.matches("nested.draft.md"));
        assert!(!config.matches("post.markdown"));
        assert!(!config.matches("README"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BatchConfig = serde_yaml::from_str("target_format: toml\ndirection: hugo2hexo\n").unwrap();
        assert_eq!(config.target_format, "toml");
        assert_eq!(config.direction, Direction::HugoToHexo);
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    }
}
