use std::io;
use std::slice;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

use super::layout::Cursors;
use super::Buffer::RingBuffer;
use crate::Core::alloc::{allocate_slots, empty_slots};
use crate::SPSC::{Consumer, Producer};

impl<T> RingBuffer<T> {
    /// Create an empty, uninitialized buffer with capacity 0.
    ///
    /// Every reservation fails until [`RingBuffer::resize`] succeeds.
    pub fn new() -> Self {
        Self {
            cursors: Cursors::new(),
            storage: empty_slots(),
            capacity: 0,
        }
    }

    /// Usable capacity: the largest number of elements that can be resident.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether storage is currently allocated.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.capacity > 0
    }

    /// Number of physical slots, `capacity + 1` (0 when uninitialized).
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.storage.len()
    }

    /// Number of unread elements.
    ///
    /// This is a snapshot: it is only exact while neither side is mid-commit.
    pub fn len(&self) -> usize {
        let n = self.slot_count();
        if n == 0 {
            return 0;
        }
        let write = self.cursors.write.load(Acquire);
        let read = self.cursors.read.load(Acquire);
        (write + n - read) % n
    }

    /// Returns `true` if there is nothing to read.
    pub fn is_empty(&self) -> bool {
        self.cursors.write.load(Acquire) == self.cursors.read.load(Acquire)
    }

    /// Returns `true` if `capacity` elements are resident.
    ///
    /// An uninitialized buffer is reported as full: nothing can be written to it.
    pub fn is_full(&self) -> bool {
        let n = self.slot_count();
        if n == 0 {
            return true;
        }
        let write = self.cursors.write.load(Acquire);
        self.wrap(write + 1) == self.cursors.read.load(Acquire)
    }

    /// Number of free slots in total, regardless of contiguity.
    pub fn free_len(&self) -> usize {
        self.capacity - self.len()
    }

    /// Split the buffer into its producer and consumer halves.
    ///
    /// Both halves borrow the buffer, so it outlives the threads they are moved
    /// into and cannot be resized while either exists.
    pub fn split(&mut self) -> (Producer<'_, T>, Consumer<'_, T>) {
        let ring: &RingBuffer<T> = self;
        (Producer::new(ring), Consumer::new(ring))
    }

    /// Wrap an index that is at most `slot_count` back into range.
    #[inline(always)]
    fn wrap(&self, index: usize) -> usize {
        if index >= self.slot_count() {
            index - self.slot_count()
        } else {
            index
        }
    }

    /// Whether a reservation of `requested` slots can ever be satisfied.
    #[inline(always)]
    pub(crate) fn accepts(&self, requested: usize) -> bool {
        requested != 0 && requested <= self.capacity
    }

    /// The contiguous run of free slots starting at the write cursor, as
    /// `(start, len)`.
    ///
    /// The run stops at the physical end of the storage and never reaches the
    /// slot just before the read cursor. Producer side only.
    #[inline]
    pub(crate) fn writable_run(&self) -> (usize, usize) {
        let n = self.slot_count();
        if n == 0 {
            return (0, 0);
        }
        let write = self.cursors.write.load(Relaxed);
        let read = self.cursors.read.load(Acquire);

        let len = if read > write {
            read - write - 1
        } else if read == 0 {
            // Filling up to the end would wrap `write` onto `read`.
            n - write - 1
        } else {
            n - write
        };
        (write, len)
    }

    /// The contiguous run of filled slots starting at the read cursor, as
    /// `(start, len)`. Consumer side only.
    #[inline]
    pub(crate) fn readable_run(&self) -> (usize, usize) {
        let n = self.slot_count();
        if n == 0 {
            return (0, 0);
        }
        let read = self.cursors.read.load(Relaxed);
        let write = self.cursors.write.load(Acquire);

        let len = if write >= read { write - read } else { n - read };
        (read, len)
    }

    /// Publish `count` filled slots by advancing the write cursor.
    ///
    /// The caller guarantees `count` does not exceed the run returned by the
    /// latest [`writable_run`](Self::writable_run).
    #[inline]
    pub(crate) fn commit_write(&self, count: usize) {
        let write = self.cursors.write.load(Relaxed);
        self.cursors.write.store(self.wrap(write + count), Release);
    }

    /// Release `count` drained slots by advancing the read cursor.
    ///
    /// The caller guarantees `count` does not exceed the run returned by the
    /// latest [`readable_run`](Self::readable_run).
    #[inline]
    pub(crate) fn commit_read(&self, count: usize) {
        let read = self.cursors.read.load(Relaxed);
        self.cursors.read.store(self.wrap(read + count), Release);
    }

    /// Mutable view of `len` slots starting at `start`.
    ///
    /// # Safety
    /// The range must lie inside a run returned by `writable_run`, and only the
    /// producer may hold such a view.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn slots_mut(&self, start: usize, len: usize) -> &mut [T] {
        debug_assert!(start + len <= self.slot_count());
        let base = std::cell::UnsafeCell::raw_get(self.storage.as_ptr());
        slice::from_raw_parts_mut(base.add(start), len)
    }

    /// Shared view of `len` slots starting at `start`.
    ///
    /// # Safety
    /// The range must lie inside a run returned by `readable_run`, and only the
    /// consumer may hold such a view.
    #[inline]
    pub(crate) unsafe fn slots(&self, start: usize, len: usize) -> &[T] {
        debug_assert!(start + len <= self.slot_count());
        let base = std::cell::UnsafeCell::raw_get(self.storage.as_ptr());
        slice::from_raw_parts(base.add(start) as *const T, len)
    }
}

impl<T: Default> RingBuffer<T> {
    /// Create a buffer that can hold `capacity` elements.
    pub fn with_capacity(capacity: usize) -> io::Result<Self> {
        let mut ring = Self::new();
        ring.resize(capacity)?;
        Ok(ring)
    }

    /// Reallocate the storage for a new usable `capacity` and reset the buffer
    /// to empty.
    ///
    /// Any unread elements are discarded. On failure the buffer is left
    /// uninitialized (capacity 0) until a later resize succeeds.
    pub fn resize(&mut self, capacity: usize) -> io::Result<()> {
        // Release the old storage first so that a failed resize leaves nothing behind.
        self.storage = empty_slots();
        self.capacity = 0;
        *self.cursors.write.get_mut() = 0;
        *self.cursors.read.get_mut() = 0;

        self.storage = allocate_slots(capacity)?;
        self.capacity = capacity;
        Ok(())
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
