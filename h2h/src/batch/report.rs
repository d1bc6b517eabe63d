//! Batch-level results and errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::config::ConfigError;
use super::task::{ConversionFailure, TaskOutcome};

/// Aggregate of every task outcome in one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Tasks that ran to a terminal outcome
    pub attempted: usize,
    /// Tasks whose destination file was written
    pub converted: usize,
    /// Failed tasks, sorted by source path once the batch completes
    pub failures: Vec<ConversionFailure>,
}

impl BatchReport {
    pub fn record(&mut self, outcome: TaskOutcome) {
        self.attempted += 1;
        match outcome {
            TaskOutcome::Converted { .. } => self.converted += 1,
            TaskOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn finish(&mut self) {
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

/// Errors that end a batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("creating destination directory {}: {source}", .path.display())]
    DestinationInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walking source directory {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
        /// Outcomes of the tasks admitted before the walk failed
        report: BatchReport,
    },

    #[error("source discovery task failed: {0}")]
    Discovery(#[from] tokio::task::JoinError),

    #[error("encountered {} errors during conversion", .report.failures.len())]
    Failed { report: BatchReport },
}

impl BatchError {
    /// Report of the tasks that ran, if the batch got that far
    pub fn report(&self) -> Option<&BatchReport> {
        match self {
            BatchError::Walk { report, .. } | BatchError::Failed { report } => Some(report),
            _ => None,
        }
    }

    /// True if the batch never started or stopped admitting tasks early
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BatchError::Failed { .. })
    }
}
