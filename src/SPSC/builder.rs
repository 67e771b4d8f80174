use super::RingBuffer;

pub struct RingBufferBuilder {
    capacity: usize,
}

impl Default for RingBufferBuilder {
    fn default() -> Self {
        Self {
            capacity: 1024, // 1024 usable slots
        }
    }
}

impl RingBufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn build<T: Default>(self) -> std::io::Result<RingBuffer<T>> {
        RingBuffer::with_capacity(self.capacity)
    }
}
