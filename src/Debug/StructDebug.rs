use crate::SPSC::{Consumer, Producer, RingBuffer};
use std::fmt;

/// Debug function for RingBuffer
///
/// Shows the configuration and a snapshot of both cursors.
/// Slot contents are never read, so `T` needs no `Debug` bound and a
/// concurrent producer is never raced.
pub fn debug_ring_buffer<T>(buffer: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuffer")
        .field("capacity", &buffer.capacity())
        .field("initialized", &buffer.is_initialized())
        .field("write_index", &buffer.write_index())
        .field("read_index", &buffer.read_index())
        .field("len", &buffer.len())
        .field("storage", &format_args!("{:p}", buffer.storage.as_ptr()))
        .finish()
}

/// Debug function for Producer
///
/// Shows the outstanding reservation and the cursor the producer owns.
pub fn debug_producer<T>(producer: &Producer<'_, T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Producer")
        .field("write_index", &producer.ring().write_index())
        .field("reserved", &producer.reserved())
        .finish_non_exhaustive()
}

/// Debug function for Consumer
pub fn debug_consumer<T>(consumer: &Consumer<'_, T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Consumer")
        .field("read_index", &consumer.ring().read_index())
        .field("reserved", &consumer.reserved())
        .finish_non_exhaustive()
}
