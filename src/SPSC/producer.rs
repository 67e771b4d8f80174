// In src/SPSC/producer.rs
use crate::Core::backoff::RetryPolicy;
use crate::SPSC::Buffer::RingBuffer;
use std::io;
use std::time::{Duration, Instant};

/// The writing half of a [`RingBuffer`].
///
/// There is exactly one producer per [`RingBuffer::split`]. It is `Send` but
/// not `Clone`, so the single-writer discipline of the write cursor holds by
/// construction.
///
/// Transfers are two-step: [`poke`](Self::poke) hands out a contiguous slice of
/// free slots, the caller fills a prefix of it, and [`write`](Self::write)
/// publishes that prefix to the consumer.
pub struct Producer<'a, T> {
    ring: &'a RingBuffer<T>,
    /// Length of the outstanding reservation, 0 when idle.
    reserved: usize,
}

impl<'a, T> Producer<'a, T> {
    pub(crate) fn new(ring: &'a RingBuffer<T>) -> Self {
        Self { ring, reserved: 0 }
    }

    /// Reserve at least `requested` contiguous free slots.
    ///
    /// # Returns
    /// * `Some(slots)` starting at the write cursor. The slice may be longer
    ///   than `requested`; any prefix of it may be filled.
    /// * `None` if the straight run before the end of the storage or before
    ///   unread data is too short, if `requested` is 0, or if it exceeds the
    ///   capacity. Nothing changes; retry once the consumer has made room.
    pub fn poke(&mut self, requested: usize) -> Option<&mut [T]> {
        if !self.ring.accepts(requested) {
            return None;
        }

        let (start, len) = self.ring.writable_run();
        if len < requested {
            return None;
        }

        self.reserved = len;
        // SAFETY: [start, start + len) is free space bounded by the read cursor
        // and the end of storage, and this is the only producer.
        Some(unsafe { self.ring.slots_mut(start, len) })
    }

    /// Publish the first `count` slots of the last reservation.
    ///
    /// Returns `false` and leaves every cursor untouched if `count` exceeds the
    /// outstanding reservation, or if there is none. That is a caller bug, not
    /// back-pressure: retrying the same call will not help.
    pub fn write(&mut self, count: usize) -> bool {
        if count > self.reserved {
            return false;
        }
        self.ring.commit_write(count);
        self.reserved = 0;
        true
    }

    /// Retry [`poke`](Self::poke) until it succeeds or `timeout` elapses.
    ///
    /// # Returns
    /// * `Ok(slots)` on success
    /// * `Err(TimedOut)` if no large enough run appeared in time
    /// * `Err(InvalidInput)` if `requested` can never be satisfied
    pub fn poke_timeout(
        &mut self,
        requested: usize,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> io::Result<&mut [T]> {
        if !self.ring.accepts(requested) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Cannot reserve {} slots in a ring of capacity {}",
                    requested,
                    self.ring.capacity()
                ),
            ));
        }

        let start = Instant::now();
        let mut waiter = policy.waiter();
        loop {
            let (_, len) = self.ring.writable_run();
            if len >= requested {
                break;
            }
            if start.elapsed() >= timeout {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "Timed out waiting for free space",
                ));
            }
            waiter.wait();
        }

        // Only the consumer can change the run and it can only grow it.
        self.poke(requested).ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "Free run shrank without a producer commit")
        })
    }

    /// Returns the usable capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns `true` if the consumer has drained everything written so far.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if no slot can be written right now.
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Length of the outstanding reservation, 0 when idle.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    pub(crate) fn ring(&self) -> &RingBuffer<T> {
        self.ring
    }
}

impl<'a, T: Clone> Producer<'a, T> {
    /// Copy as many leading `items` as fit in the current contiguous run and
    /// publish them.
    ///
    /// Returns the number of items transferred, 0 if the buffer has no free
    /// slot at the write cursor.
    pub fn push_slice(&mut self, items: &[T]) -> usize {
        if items.is_empty() {
            return 0;
        }
        let count = match self.poke(1) {
            Some(slots) => {
                let count = slots.len().min(items.len());
                slots[..count].clone_from_slice(&items[..count]);
                count
            }
            None => return 0,
        };
        self.write(count);
        count
    }

    /// Transfer every item, waiting according to `policy` whenever the buffer
    /// is full.
    ///
    /// Requests are one slot at a time at minimum, so this always makes
    /// progress as long as the consumer keeps draining.
    pub fn write_all(&mut self, mut items: &[T], policy: RetryPolicy) {
        let mut waiter = policy.waiter();
        while !items.is_empty() {
            let sent = self.push_slice(items);
            if sent == 0 {
                waiter.wait();
            } else {
                items = &items[sent..];
                waiter.reset();
            }
        }
    }
}
