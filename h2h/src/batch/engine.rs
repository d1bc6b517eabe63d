//! Batch engine: discover documents, convert them on a bounded worker pool,
//! write mirrored outputs and aggregate failures

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tempfile::NamedTempFile;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::codec::CodecRegistry;
use crate::document::DocumentConverter;
use crate::fieldmap::FieldMap;
use crate::transform::FrontMatterTransformer;

use super::config::BatchConfig;
use super::report::{BatchError, BatchReport};
use super::task::{ConversionFailure, ConversionTask, TaskError, TaskOutcome};

type TaskQueue = Arc<Mutex<mpsc::Receiver<ConversionTask>>>;

/// Converts every matching document under a source tree into a destination tree
///
/// Discovery runs on one blocking thread and feeds a bounded queue; exactly
/// `max_concurrency` workers drain it. Each run collects outcomes on its own
/// channel, so one engine can run several batches.
#[derive(Debug, Clone)]
pub struct BatchEngine {
    config: Arc<BatchConfig>,
    converter: Arc<DocumentConverter>,
}

impl BatchEngine {
    /// Engine with the standard YAML and TOML codecs
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        Self::with_codecs(config, CodecRegistry::standard())
    }

    /// Engine with a caller-supplied codec registry
    pub fn with_codecs(config: BatchConfig, codecs: CodecRegistry) -> Result<Self, BatchError> {
        config.validate()?;

        for format in [&config.source_format, &config.target_format] {
            if !codecs.contains(format) {
                warn!(%format, known = ?codecs.names(), "BatchEngine: format not registered, every file will fail");
            }
        }

        let transformer = FrontMatterTransformer::new(
            codecs,
            config.source_format.clone(),
            config.target_format.clone(),
            FieldMap::new(config.direction),
        );

        Ok(Self {
            config: Arc::new(config),
            converter: Arc::new(DocumentConverter::new(transformer)),
        })
    }

    /// Convert every matching file under `source_root` into `dest_root`
    ///
    /// Returns the report when every file converted. A nonzero failure count
    /// gives [`BatchError::Failed`]; converted files stay on disk either way.
    pub async fn run(&self, source_root: impl AsRef<Path>, dest_root: impl AsRef<Path>) -> Result<BatchReport, BatchError> {
        let source_root = source_root.as_ref().to_path_buf();
        let dest_root = dest_root.as_ref().to_path_buf();
        let started = Instant::now();

        info!(
            src = %source_root.display(),
            dst = %dest_root.display(),
            direction = %self.config.direction,
            source_format = %self.config.source_format,
            target_format = %self.config.target_format,
            max_concurrency = self.config.max_concurrency,
            "Starting batch conversion"
        );

        tokio::fs::create_dir_all(&dest_root)
            .await
            .map_err(|source| BatchError::DestinationInit {
                path: dest_root.clone(),
                source,
            })?;

        let workers = self.config.max_concurrency;
        let (task_tx, task_rx) = mpsc::channel::<ConversionTask>(workers);
        let queue: TaskQueue = Arc::new(Mutex::new(task_rx));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<TaskOutcome>();

        let mut pool = JoinSet::new();
        for worker_id in 0..workers {
            pool.spawn(worker(
                worker_id,
                Arc::clone(&queue),
                outcome_tx.clone(),
                Arc::clone(&self.converter),
            ));
        }
        drop(outcome_tx);

        let walker = {
            let config = Arc::clone(&self.config);
            let source_root = source_root.clone();
            let dest_root = dest_root.clone();
            tokio::task::spawn_blocking(move || discover(&source_root, &dest_root, &config, task_tx))
        };

        // Joining the walker first drops the queue sender, which lets the
        // workers drain what was admitted and then exit.
        let discovered = walker.await?;

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!(%e, "BatchEngine::run: worker task aborted");
            }
        }

        let mut report = BatchReport::default();
        while let Some(outcome) = outcome_rx.recv().await {
            report.record(outcome);
        }
        report.finish();

        info!(
            attempted = report.attempted,
            converted = report.converted,
            failed = report.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch conversion finished"
        );

        match discovered {
            Err(source) => {
                error!(%source, "BatchEngine::run: source walk failed, batch aborted");
                Err(BatchError::Walk {
                    path: source_root,
                    source,
                    report,
                })
            }
            Ok(_) if !report.is_success() => Err(BatchError::Failed { report }),
            Ok(queued) => {
                debug!(queued, "BatchEngine::run: all tasks converted");
                Ok(report)
            }
        }
    }
}

/// Walk `source_root` and queue a task per matching regular file
///
/// Runs on a blocking thread. Returns the number of queued tasks, or the
/// first walk error; tasks queued before the error are still processed.
fn discover(
    source_root: &Path,
    dest_root: &Path,
    config: &BatchConfig,
    queue: mpsc::Sender<ConversionTask>,
) -> Result<usize, walkdir::Error> {
    let mut queued = 0usize;

    // Skip the destination when it lives inside the source tree. Paths are
    // compared resolved, so `a/../src/out` and `src/out` are the same directory.
    let dest_resolved = dest_root.canonicalize().ok();
    let is_dest = |path: &Path| match &dest_resolved {
        Some(dest) => path.canonicalize().is_ok_and(|p| &p == dest),
        None => path == dest_root,
    };

    let walker = WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !is_dest(e.path()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !config.matches(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            warn!(path = %entry.path().display(), "discover: entry outside source root, skipping");
            continue;
        };

        let task = ConversionTask {
            source: entry.path().to_path_buf(),
            destination: dest_root.join(relative),
            relative: relative.to_path_buf(),
        };
        debug!(relative = %task.relative.display(), "discover: queueing task");

        if queue.blocking_send(task).is_err() {
            warn!("discover: all workers stopped, no more tasks admitted");
            break;
        }
        queued += 1;
    }

    Ok(queued)
}

async fn worker(
    worker_id: usize,
    queue: TaskQueue,
    outcomes: mpsc::UnboundedSender<TaskOutcome>,
    converter: Arc<DocumentConverter>,
) {
    debug!(worker_id, "worker: started");
    loop {
        let next = {
            let mut rx = queue.lock().await;
            rx.recv().await
        };
        let Some(task) = next else {
            break;
        };

        let outcome = run_task(&converter, task).await;
        if outcomes.send(outcome).is_err() {
            break;
        }
    }
    debug!(worker_id, "worker: queue drained");
}

async fn run_task(converter: &DocumentConverter, task: ConversionTask) -> TaskOutcome {
    match convert_file(converter, &task).await {
        Ok(()) => {
            debug!(src = %task.source.display(), dst = %task.destination.display(), "run_task: converted");
            TaskOutcome::Converted {
                source: task.source,
                destination: task.destination,
            }
        }
        Err(error) => {
            warn!(src = %task.source.display(), stage = error.stage(), %error, "run_task: conversion failed");
            TaskOutcome::Failed(ConversionFailure {
                path: task.source,
                error,
            })
        }
    }
}

async fn convert_file(converter: &DocumentConverter, task: &ConversionTask) -> Result<(), TaskError> {
    let content = tokio::fs::read_to_string(&task.source).await.map_err(TaskError::Read)?;
    let permissions = tokio::fs::metadata(&task.source)
        .await
        .map_err(TaskError::Read)?
        .permissions();

    let converted = converter.convert(&content)?;

    let parent = task
        .destination
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    tokio::fs::create_dir_all(&parent).await.map_err(TaskError::CreateDir)?;

    let destination = task.destination.clone();
    tokio::task::spawn_blocking(move || write_atomic(&parent, &destination, converted.as_bytes(), permissions))
        .await
        .map_err(|e| TaskError::Write(io::Error::other(e)))?
        .map_err(TaskError::Write)
}

/// Write `contents` to a temp file in `dir`, then rename it over `destination`
///
/// The destination is either fully replaced or left as it was; the temp file
/// is deleted on any error.
fn write_atomic(dir: &Path, destination: &Path, contents: &[u8], permissions: std::fs::Permissions) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}
