//! Producer side of the pipeline: feeds discovered files into the queue.

use std::path::PathBuf;
use std::sync::Arc;

use crate::queue::BoundedQueue;

use super::discovery::DiscoveredFile;

/// Pushes work items into the shared queue, blocking on backpressure.
pub struct Producer {
    id: usize,
    queue: Arc<BoundedQueue<PathBuf>>,
    files: Vec<DiscoveredFile>,
}

impl Producer {
    pub fn new(id: usize, queue: Arc<BoundedQueue<PathBuf>>, files: Vec<DiscoveredFile>) -> Self {
        Self { id, queue, files }
    }

    /// Enqueue every file, in order, and return how many were accepted.
    ///
    /// `put` blocks while the queue is full; items are only refused if the
    /// queue is closed underneath us, which ends the run early.
    pub fn run(self) -> usize {
        let mut enqueued = 0;
        for file in self.files {
            tracing::trace!(producer = self.id, path = %file.path.display(), "enqueueing");
            if self.queue.put(file.path).is_err() {
                tracing::warn!(
                    producer = self.id,
                    "queue closed before enumeration finished"
                );
                break;
            }
            enqueued += 1;
        }
        tracing::debug!(producer = self.id, enqueued, "producer finished");
        enqueued
    }
}
