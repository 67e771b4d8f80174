mod builder;
mod consumer;
mod producer;

pub use builder::RingBufferBuilder;
pub use consumer::Consumer;
pub use producer::Producer;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::RingBuffer; // re-export for stable path
}

pub use Buffer::RingBuffer;
