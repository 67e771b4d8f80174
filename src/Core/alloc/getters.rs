use crate::SPSC::RingBuffer;
use std::sync::atomic::Ordering;

/// Getter methods exposing the raw cursor state of a RingBuffer
///
/// These are meant for debugging, monitoring and tests. The values are
/// snapshots: a concurrent producer or consumer may move them right after
/// they are read.
impl<T> RingBuffer<T> {
    /// Index of the next slot the producer will fill
    pub fn write_index(&self) -> usize {
        self.cursors.write.load(Ordering::Acquire)
    }

    /// Index of the next slot the consumer will drain
    pub fn read_index(&self) -> usize {
        self.cursors.read.load(Ordering::Acquire)
    }

    /// Number of physical slots backing the buffer (capacity + 1)
    ///
    /// Returns 0 when the buffer is uninitialized.
    pub fn storage_len(&self) -> usize {
        self.slot_count()
    }
}
