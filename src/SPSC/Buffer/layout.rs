use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicUsize;

/// The cursor block of one ring buffer.
///
/// Each index has exactly one writer: the producer owns `write`, the consumer
/// owns `read`. Both are read by the opposite side. Keeping them on separate
/// cache lines stops the two threads from invalidating each other's line on
/// every commit.
#[repr(C)]
pub struct Cursors {
    /// Index of the next slot the producer will fill.
    /// Stored with `Release` after the slot contents are complete.
    pub write: CachePadded<AtomicUsize>,

    /// Index of the next slot the consumer will drain.
    /// Stored with `Release` once the consumer is done with the slots before it.
    pub read: CachePadded<AtomicUsize>,
}

impl Cursors {
    pub const fn new() -> Self {
        Self {
            write: CachePadded::new(AtomicUsize::new(0)),
            read: CachePadded::new(AtomicUsize::new(0)),
        }
    }
}

impl Default for Cursors {
    fn default() -> Self {
        Self::new()
    }
}
