//! Lock-free ring buffer between the capture callback and the tick loop
//!
//! The cpal callback owns the producer half; the microphone analyser owns the
//! consumer half and drains it once per tick.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Mono sample ring buffer, split once into its two halves
pub struct AudioRingBuffer {
    producer: HeapProducer<f64>,
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl AudioRingBuffer {
    /// Create new ring buffer holding up to `capacity` mono samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f64>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into producer (capture side) and consumer (analysis side)
    pub fn split(self) -> (AudioProducer, AudioConsumer) {
        (
            AudioProducer {
                producer: self.producer,
            },
            AudioConsumer {
                consumer: self.consumer,
                capacity: self.capacity,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Capture side of the ring buffer
pub struct AudioProducer {
    producer: HeapProducer<f64>,
}

impl AudioProducer {
    /// Push samples; returns how many fit. Overflowing samples are dropped,
    /// the analyser only ever needs the most recent window.
    pub fn write(&mut self, samples: &[f64]) -> usize {
        self.producer.push_slice(samples)
    }

    /// Push a single sample, dropping it if the buffer is full
    pub fn push(&mut self, sample: f64) -> bool {
        self.producer.push(sample).is_ok()
    }
}

/// Analysis side of the ring buffer
pub struct AudioConsumer {
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl AudioConsumer {
    /// Pop up to `buffer.len()` samples; returns the number read
    pub fn read(&mut self, buffer: &mut [f64]) -> usize {
        self.consumer.pop_slice(buffer)
    }

    /// Number of samples waiting to be read
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_write_read() {
        let rb = AudioRingBuffer::new(1024);
        let (mut producer, mut consumer) = rb.split();

        let data = vec![0.1, -0.2, 0.3, -0.4, 0.5];
        assert_eq!(producer.write(&data), 5);
        assert_eq!(consumer.len(), 5);

        let mut output = vec![0.0; 5];
        assert_eq!(consumer.read(&mut output), 5);
        assert_eq!(output, data);
        assert!(consumer.is_empty());
    }

    #[test]
    fn test_ring_buffer_drops_overflow() {
        let rb = AudioRingBuffer::new(10);
        let (mut producer, mut consumer) = rb.split();

        let written = producer.write(&[1.0; 20]);
        assert!(written <= 10);
        assert!(!producer.push(2.0));

        let mut output = vec![0.0; 20];
        assert_eq!(consumer.read(&mut output), written);
    }

    #[test]
    fn test_ring_buffer_empty_read() {
        let rb = AudioRingBuffer::new(64);
        assert_eq!(rb.capacity(), 64);
        let (_producer, mut consumer) = rb.split();

        let mut output = vec![0.0; 10];
        assert_eq!(consumer.read(&mut output), 0);
    }
}
