// This is the contiguous ring buffer shared by exactly one producer and one consumer

use super::layout::Cursors;

use std::cell::UnsafeCell;

/// A lock-free, single-producer single-consumer (SPSC) ring buffer that only
/// ever hands out contiguous regions of its backing storage.
///
/// The storage holds `capacity + 1` slots. The spare slot lets "empty"
/// (`write == read`) and "full" (`write + 1 == read`, modulo the slot count)
/// be told apart from the two cursors alone, without a shared counter.
///
/// ### Concurrency Design:
/// - **Producer (Poke/Write)**: reserves the straight run of free slots starting
///   at `write`, fills it through a `&mut [T]`, then publishes the new `write`
///   with `Release`.
/// - **Consumer (Peek/Read)**: reserves the straight run of filled slots starting
///   at `read`, inspects it through a `&[T]`, then publishes the new `read` with
///   `Release`.
/// - A reservation never crosses the physical end of the storage. When the run
///   before the end is shorter than requested the call fails, even if more
///   space exists after wrapping.
///
/// The two roles are obtained with [`RingBuffer::split`], which borrows the
/// buffer mutably so that [`RingBuffer::resize`] cannot run while a producer or
/// consumer is alive.
pub struct RingBuffer<T> {
    /// Write and read indices, each on its own cache line.
    pub(crate) cursors: Cursors,

    /// The backing slots. Empty while the buffer is uninitialized.
    /// Slot ownership alternates between the two sides according to the cursors.
    pub(crate) storage: Box<[UnsafeCell<T>]>,

    /// Usable capacity. Always `storage.len() - 1`, or 0 when uninitialized.
    pub(crate) capacity: usize,
}

// A slot is only ever touched by the side whose cursor range covers it, and
// hand-over between the sides happens through Release/Acquire on the cursors.
unsafe impl<T: Send> Send for RingBuffer<T> {}
unsafe impl<T: Send> Sync for RingBuffer<T> {}
