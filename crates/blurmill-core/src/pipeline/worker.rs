//! Worker side of the pipeline: the decode → blur → encode consumer loop.

use std::path::PathBuf;
use std::sync::Arc;

use crate::codec::ImageCodec;
use crate::filter::blur_image;
use crate::queue::BoundedQueue;

use super::paths::PathMapper;

/// Per-worker outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Items decoded, blurred, and encoded successfully
    pub processed: u64,
    /// Items skipped after a decode/encode failure
    pub failed: u64,
}

/// A consumer that repeatedly pulls work from the shared queue until the
/// queue is closed and drained.
///
/// Each worker owns the decoded image for the item it is processing; the
/// queue is the only state shared with the rest of the pipeline.
pub struct Worker<C: ImageCodec> {
    id: usize,
    queue: Arc<BoundedQueue<PathBuf>>,
    codec: Arc<C>,
    mapper: PathMapper,
    filter_size: usize,
}

impl<C: ImageCodec> Worker<C> {
    pub fn new(
        id: usize,
        queue: Arc<BoundedQueue<PathBuf>>,
        codec: Arc<C>,
        mapper: PathMapper,
        filter_size: usize,
    ) -> Self {
        Self {
            id,
            queue,
            codec,
            mapper,
            filter_size,
        }
    }

    /// Consume items until the queue signals end-of-stream.
    ///
    /// A decode or encode failure is isolated to that item: it is logged,
    /// counted, and the loop moves on. Sibling workers and the queue are
    /// never affected by one bad file.
    pub fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::default();
        while let Some(path) = self.queue.get() {
            tracing::debug!(
                worker = self.id,
                path = %path.display(),
                buffered = self.queue.len(),
                "processing"
            );
            match self.process_one(&path) {
                Ok(output) => {
                    stats.processed += 1;
                    tracing::debug!(worker = self.id, output = %output.display(), "written");
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!(worker = self.id, path = %path.display(), "skipped: {e}");
                }
            }
        }
        tracing::debug!(
            worker = self.id,
            processed = stats.processed,
            failed = stats.failed,
            "worker finished"
        );
        stats
    }

    fn process_one(&self, path: &std::path::Path) -> crate::error::PipelineResult<PathBuf> {
        let image = self.codec.decode(path)?;
        let blurred = blur_image(&image, self.filter_size);
        let output = self.mapper.map_and_prepare(path)?;
        self.codec.encode(&output, &blurred)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::image::{Channel, Image};
    use std::path::Path;
    use std::sync::Mutex;

    /// Codec double: decodes a fixed image for known paths, records encodes.
    struct StubCodec {
        fail_on: Option<PathBuf>,
        encoded: Mutex<Vec<PathBuf>>,
    }

    impl StubCodec {
        fn new(fail_on: Option<PathBuf>) -> Self {
            Self {
                fail_on,
                encoded: Mutex::new(Vec::new()),
            }
        }
    }

    impl ImageCodec for StubCodec {
        fn decode(&self, path: &Path) -> Result<Image, PipelineError> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: "stub failure".to_string(),
                });
            }
            Ok(Image::new([
                Channel::filled(7, 7, 100),
                Channel::filled(7, 7, 150),
                Channel::filled(7, 7, 200),
            ]))
        }

        fn encode(&self, path: &Path, _image: &Image) -> Result<(), PipelineError> {
            self.encoded.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn run_worker(codec: Arc<StubCodec>, inputs: &[&str]) -> WorkerStats {
        let queue = Arc::new(BoundedQueue::new(11));
        for input in inputs {
            queue.put(PathBuf::from(input)).unwrap();
        }
        queue.close();

        let dir = tempfile::tempdir().unwrap();
        let mapper = PathMapper::new("/in", dir.path());
        Worker::new(0, queue, codec, mapper, 5).run()
    }

    #[test]
    fn test_worker_processes_until_closed() {
        let codec = Arc::new(StubCodec::new(None));
        let stats = run_worker(Arc::clone(&codec), &["/in/a.png", "/in/b.png"]);

        assert_eq!(stats, WorkerStats { processed: 2, failed: 0 });
        assert_eq!(codec.encoded.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_worker_isolates_bad_item() {
        let codec = Arc::new(StubCodec::new(Some(PathBuf::from("/in/bad.png"))));
        let stats = run_worker(
            Arc::clone(&codec),
            &["/in/a.png", "/in/bad.png", "/in/b.png"],
        );

        // The bad item is counted and skipped; the good ones still land.
        assert_eq!(stats, WorkerStats { processed: 2, failed: 1 });
        assert_eq!(codec.encoded.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_worker_counts_foreign_path_as_failure() {
        let codec = Arc::new(StubCodec::new(None));
        let stats = run_worker(Arc::clone(&codec), &["/elsewhere/x.png"]);
        assert_eq!(stats, WorkerStats { processed: 0, failed: 1 });
    }
}
