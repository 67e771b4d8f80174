// Module naming follows project convention (SPSC = Single-Producer Single-Consumer)
#[allow(non_snake_case)]
pub mod SPSC;

#[allow(non_snake_case)]
pub mod Core {
    pub mod alloc;
    pub mod backoff;
    pub use backoff::RetryPolicy;
}

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod ffi;

pub use SPSC::{Consumer, Producer, RingBuffer, RingBufferBuilder};
