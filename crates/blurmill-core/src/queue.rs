//! Fixed-capacity circular work queue with blocking handoff.
//!
//! This is the single point of synchronization between the producer and the
//! worker pool. When the buffer is full the producer blocks, providing
//! backpressure so memory use is bounded by capacity rather than by backlog
//! size. Coordination is classic monitor discipline: one mutex guards the
//! buffer, and two condition variables (`space_available`, `data_available`)
//! park full producers and empty consumers without busy-polling.
//!
//! There are no timeouts: a blocked `put` or `get` waits until a matching
//! operation or until [`BoundedQueue::close`] wakes it. Closing the queue is
//! the shutdown protocol — consumers drain what remains and then observe
//! end-of-stream.

use std::sync::{Condvar, Mutex};

/// Returned by [`BoundedQueue::put`] when the queue has been closed; carries
/// the rejected item back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct QueueClosed<T>(pub T);

struct Slots<T> {
    /// Ring storage; a slot is `Some` exactly while it holds a live item.
    slots: Box<[Option<T>]>,
    /// Next slot to write (the `in` index).
    write: usize,
    /// Next slot to read (the `out` index).
    read: usize,
    /// Live items currently buffered.
    count: usize,
    closed: bool,
}

impl<T> Slots<T> {
    fn check_invariants(&self) {
        debug_assert!(self.count <= self.slots.len());
        debug_assert!(self.write < self.slots.len());
        debug_assert!(self.read < self.slots.len());
        debug_assert_eq!(self.write, (self.read + self.count) % self.slots.len());
    }
}

/// Bounded FIFO queue shared by one (or more) producers and many consumers.
pub struct BoundedQueue<T> {
    inner: Mutex<Slots<T>>,
    space_available: Condvar,
    data_available: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given fixed capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            inner: Mutex::new(Slots {
                slots: slots.into_boxed_slice(),
                write: 0,
                read: 0,
                count: 0,
                closed: false,
            }),
            space_available: Condvar::new(),
            data_available: Condvar::new(),
        }
    }

    /// Insert an item, blocking while the queue is full.
    ///
    /// Returns `Err(QueueClosed(item))` if the queue was closed before a
    /// free slot appeared; the item is handed back untouched.
    pub fn put(&self, item: T) -> Result<(), QueueClosed<T>> {
        let mut inner = self
            .space_available
            .wait_while(self.lock(), |q| {
                q.count == q.slots.len() && !q.closed
            })
            .expect("queue mutex poisoned");
        if inner.closed {
            return Err(QueueClosed(item));
        }

        let write = inner.write;
        debug_assert!(inner.slots[write].is_none(), "overwrote a live slot");
        inner.slots[write] = Some(item);
        inner.write = (write + 1) % inner.slots.len();
        inner.count += 1;
        inner.check_invariants();
        drop(inner);

        self.data_available.notify_one();
        Ok(())
    }

    /// Remove the oldest item, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and fully drained.
    pub fn get(&self) -> Option<T> {
        let mut inner = self
            .data_available
            .wait_while(self.lock(), |q| q.count == 0 && !q.closed)
            .expect("queue mutex poisoned");
        if inner.count == 0 {
            // Closed and drained.
            return None;
        }

        let read = inner.read;
        let item = inner.slots[read].take();
        debug_assert!(item.is_some(), "read an empty slot");
        inner.read = (read + 1) % inner.slots.len();
        inner.count -= 1;
        inner.check_invariants();
        drop(inner);

        self.space_available.notify_one();
        item
    }

    /// Close the queue: no further `put` succeeds, and `get` returns `None`
    /// once the remaining items are drained. Wakes every blocked thread.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        drop(inner);
        self.space_available.notify_all();
        self.data_available.notify_all();
    }

    /// Items currently buffered.
    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slots<T>> {
        self.inner.lock().expect("queue mutex poisoned")
    }
}
