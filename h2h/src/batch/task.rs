//! Per-file units of work and their outcomes

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::ConvertError;

/// One file to convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    /// Absolute or root-joined source path
    pub source: PathBuf,
    /// Path the converted document is written to
    pub destination: PathBuf,
    /// Path relative to both roots
    pub relative: PathBuf,
}

/// Errors confined to a single file
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("opening source file: {0}")]
    Read(#[source] io::Error),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("creating destination directory: {0}")]
    CreateDir(#[source] io::Error),

    #[error("writing destination file: {0}")]
    Write(#[source] io::Error),
}

impl TaskError {
    /// Short label of the step that failed
    pub fn stage(&self) -> &'static str {
        match self {
            TaskError::Read(_) => "read",
            TaskError::Convert(ConvertError::Split(_)) => "split",
            TaskError::Convert(ConvertError::Transform(_)) => "transform",
            TaskError::CreateDir(_) | TaskError::Write(_) => "write",
        }
    }
}

/// A file that could not be converted
#[derive(Debug)]
pub struct ConversionFailure {
    pub path: PathBuf,
    pub error: TaskError,
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "converting file {}: {}", self.path.display(), self.error)
    }
}

/// Terminal result of one task
#[derive(Debug)]
pub enum TaskOutcome {
    Converted { source: PathBuf, destination: PathBuf },
    Failed(ConversionFailure),
}
