// src/SPSC/consumer.rs

use crate::Core::backoff::RetryPolicy;
use crate::SPSC::Buffer::RingBuffer;
use std::io;
use std::time::{Duration, Instant};

/// The reading half of a [`RingBuffer`].
///
/// Mirror image of [`Producer`](crate::SPSC::Producer): [`peek`](Self::peek)
/// exposes a contiguous run of unread elements, [`read`](Self::read) hands the
/// first `count` of them back to the producer.
pub struct Consumer<'a, T> {
    ring: &'a RingBuffer<T>,
    reserved: usize,
}

impl<'a, T> Consumer<'a, T> {
    pub(crate) fn new(ring: &'a RingBuffer<T>) -> Self {
        Self { ring, reserved: 0 }
    }

    /// Reserve at least `requested` contiguous unread elements.
    ///
    /// # Returns
    /// * `Some(slots)` starting at the read cursor, possibly longer than
    ///   `requested`.
    /// * `None` if fewer than `requested` elements sit in a straight run before
    ///   the write cursor or the end of the storage, if `requested` is 0, or if
    ///   it exceeds the capacity.
    pub fn peek(&mut self, requested: usize) -> Option<&[T]> {
        if !self.ring.accepts(requested) {
            return None;
        }

        let (start, len) = self.ring.readable_run();
        if len < requested {
            return None;
        }

        self.reserved = len;
        // SAFETY: [start, start + len) was published by the producer with a
        // Release store we observed through Acquire, and this is the only consumer.
        Some(unsafe { self.ring.slots(start, len) })
    }

    /// Release the first `count` elements of the last reservation.
    ///
    /// Returns `false` without side effects if `count` exceeds the outstanding
    /// reservation, or if there is none.
    pub fn read(&mut self, count: usize) -> bool {
        if count > self.reserved {
            return false;
        }
        self.ring.commit_read(count);
        self.reserved = 0;
        true
    }

    /// Retry [`peek`](Self::peek) until it succeeds or `timeout` elapses.
    pub fn peek_timeout(
        &mut self,
        requested: usize,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> io::Result<&[T]> {
        if !self.ring.accepts(requested) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Cannot reserve {} elements in a ring of capacity {}",
                    requested,
                    self.ring.capacity()
                ),
            ));
        }

        let start = Instant::now();
        let mut waiter = policy.waiter();
        loop {
            let (_, len) = self.ring.readable_run();
            if len >= requested {
                break;
            }
            if start.elapsed() >= timeout {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "Timed out waiting for data",
                ));
            }
            waiter.wait();
        }

        self.peek(requested).ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "Readable run shrank without a consumer commit")
        })
    }

    /// Returns the usable capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Number of unread elements, contiguous or not.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if there is nothing to read.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Length of the outstanding reservation, 0 when idle.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    pub(crate) fn ring(&self) -> &RingBuffer<T> {
        self.ring
    }
}

impl<'a, T: Clone> Consumer<'a, T> {
    /// Copy as many unread elements as the current contiguous run holds into
    /// the front of `out` and release them.
    ///
    /// Returns the number of elements transferred, 0 if the buffer is empty.
    pub fn pop_slice(&mut self, out: &mut [T]) -> usize {
        if out.is_empty() {
            return 0;
        }
        let count = match self.peek(1) {
            Some(slots) => {
                let count = slots.len().min(out.len());
                out[..count].clone_from_slice(&slots[..count]);
                count
            }
            None => return 0,
        };
        self.read(count);
        count
    }

    /// Fill `out` completely, waiting according to `policy` whenever the
    /// buffer is empty.
    pub fn read_exact(&mut self, mut out: &mut [T], policy: RetryPolicy) {
        let mut waiter = policy.waiter();
        while !out.is_empty() {
            let got = self.pop_slice(out);
            if got == 0 {
                waiter.wait();
            } else {
                let rest = out;
                out = &mut rest[got..];
                waiter.reset();
            }
        }
    }
}
