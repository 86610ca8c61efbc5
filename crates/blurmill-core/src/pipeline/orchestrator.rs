//! Pipeline orchestration: root validation, thread lifecycle, and stats.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::codec::{FileCodec, ImageCodec};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::queue::BoundedQueue;

use super::discovery::{DiscoveredFile, FileDiscovery};
use super::paths::PathMapper;
use super::producer::Producer;
use super::worker::Worker;

/// Aggregate outcome of one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStats {
    /// Files found under the input root
    pub discovered: usize,
    /// Items the producers handed to the queue
    pub enqueued: usize,
    /// Items fully processed and written
    pub processed: u64,
    /// Items skipped after per-item failures
    pub failed: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Owns one run of the pipeline: wires the shared queue to producer and
/// worker threads and joins all of them before returning.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run against the filesystem with the production codec.
    pub fn run(&self, input_root: &Path, output_root: &Path) -> Result<PipelineStats> {
        self.run_with_codec(Arc::new(FileCodec), input_root, output_root)
    }

    /// Run with a caller-supplied codec.
    ///
    /// Configuration problems (invalid settings, missing input root, an
    /// unusable output root) fail here, before any thread starts.
    pub fn run_with_codec<C: ImageCodec + 'static>(
        &self,
        codec: Arc<C>,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<PipelineStats> {
        self.config.validate()?;
        validate_roots(input_root, output_root)?;

        let discovery = FileDiscovery::new(self.config.processing.clone());
        let files = discovery.discover(input_root);
        let discovered = files.len();
        tracing::info!(
            discovered,
            workers = self.config.pipeline.worker_count,
            queue_capacity = self.config.pipeline.queue_capacity,
            filter_size = self.config.filter.filter_size,
            "starting pipeline"
        );

        let start = Instant::now();
        let queue: Arc<BoundedQueue<PathBuf>> =
            Arc::new(BoundedQueue::new(self.config.pipeline.queue_capacity));
        let mapper = PathMapper::new(input_root, output_root);

        let producer_handles = self.spawn_producers(&queue, files)?;
        let worker_handles = self.spawn_workers(&queue, &codec, &mapper)?;

        // Shutdown protocol: once every producer has exhausted its share,
        // close the queue so workers drain what remains and exit. Every
        // thread is joined before the run reports back.
        let mut enqueued = 0;
        for handle in producer_handles {
            enqueued += join(handle);
        }
        queue.close();

        let mut processed = 0;
        let mut failed = 0;
        for handle in worker_handles {
            let stats = join(handle);
            processed += stats.processed;
            failed += stats.failed;
        }

        let stats = PipelineStats {
            discovered,
            enqueued,
            processed,
            failed,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            processed = stats.processed,
            failed = stats.failed,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "pipeline finished"
        );
        Ok(stats)
    }

    fn spawn_producers(
        &self,
        queue: &Arc<BoundedQueue<PathBuf>>,
        files: Vec<DiscoveredFile>,
    ) -> Result<Vec<std::thread::JoinHandle<usize>>> {
        let producer_count = self.config.pipeline.producer_count;
        let chunk_size = files.len().div_ceil(producer_count).max(1);

        let mut handles = Vec::with_capacity(producer_count);
        let mut chunks = files.chunks(chunk_size);
        for id in 0..producer_count {
            let share = chunks.next().unwrap_or(&[]).to_vec();
            let producer = Producer::new(id, Arc::clone(queue), share);
            let handle = std::thread::Builder::new()
                .name(format!("blur-producer-{id}"))
                .spawn(move || producer.run())?;
            handles.push(handle);
        }
        Ok(handles)
    }

    fn spawn_workers<C: ImageCodec + 'static>(
        &self,
        queue: &Arc<BoundedQueue<PathBuf>>,
        codec: &Arc<C>,
        mapper: &PathMapper,
    ) -> Result<Vec<std::thread::JoinHandle<super::worker::WorkerStats>>> {
        let mut handles = Vec::with_capacity(self.config.pipeline.worker_count);
        for id in 0..self.config.pipeline.worker_count {
            let worker = Worker::new(
                id,
                Arc::clone(queue),
                Arc::clone(codec),
                mapper.clone(),
                self.config.filter.filter_size,
            );
            let handle = std::thread::Builder::new()
                .name(format!("blur-worker-{id}"))
                .spawn(move || worker.run())?;
            handles.push(handle);
        }
        Ok(handles)
    }
}

/// Join a pipeline thread, resuming its panic on this thread if it had one.
fn join<T>(handle: std::thread::JoinHandle<T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Check the input root is a readable directory and the output root exists
/// or can be created as one.
fn validate_roots(input_root: &Path, output_root: &Path) -> std::result::Result<(), ConfigError> {
    if !input_root.is_dir() {
        return Err(ConfigError::InputRootInvalid(input_root.to_path_buf()));
    }

    if output_root.exists() {
        if !output_root.is_dir() {
            return Err(ConfigError::OutputRootNotDirectory(
                output_root.to_path_buf(),
            ));
        }
    } else {
        std::fs::create_dir_all(output_root).map_err(|e| ConfigError::OutputRootUncreatable {
            path: output_root.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}
