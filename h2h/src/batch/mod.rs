//! Batch conversion of a document tree
//!
//! Provides:
//! - Recursive discovery of matching documents
//! - A fixed pool of workers bounded by `max_concurrency`
//! - Atomic, mirrored destination writes
//! - Per-file failure isolation and an aggregate report

mod config;
mod engine;
mod report;
mod task;

pub use config::{BatchConfig, ConfigError, DEFAULT_EXTENSION, DEFAULT_MAX_CONCURRENCY};
pub use engine::BatchEngine;
pub use report::{BatchError, BatchReport};
pub use task::{ConversionFailure, ConversionTask, TaskError, TaskOutcome};
