//! Capture devices the driver pulls snapshots from

use crate::audio::buffer::AudioConsumer;
use crate::spectrum::{bin_width, AnalyserConfig, ByteSpectrumAnalyser};

/// Source of one byte magnitude snapshot per tick
///
/// The returned slice is the device's own buffer, overwritten on the next
/// call. Retrieval never blocks.
pub trait CaptureDevice {
    fn sample_rate(&self) -> f64;

    fn fft_size(&self) -> usize;

    fn snapshot(&mut self) -> &[u8];

    fn bin_width(&self) -> f64 {
        bin_width(self.sample_rate(), self.fft_size())
    }
}

/// Microphone-backed device: drains the capture ring buffer into a sliding
/// block of the latest `fft_size` samples and analyses it
pub struct MicrophoneAnalyser {
    consumer: AudioConsumer,
    analyser: ByteSpectrumAnalyser,
    sample_rate: f64,
    history: Vec<f64>,
    scratch: Vec<f64>,
}

impl MicrophoneAnalyser {
    pub fn new(consumer: AudioConsumer, sample_rate: f64, config: AnalyserConfig) -> Self {
        let fft_size = config.fft_size;

        Self {
            consumer,
            analyser: ByteSpectrumAnalyser::new(config),
            sample_rate,
            history: vec![0.0; fft_size],
            scratch: vec![0.0; fft_size],
        }
    }

    /// Move everything currently queued into the history block
    fn drain(&mut self) {
        let fft_size = self.history.len();
        // Bounded so a producer outpacing us can't pin the tick
        let max_reads = self.consumer.capacity() / fft_size.max(1) + 1;

        for _ in 0..max_reads {
            let n = self.consumer.read(&mut self.scratch);
            if n == 0 {
                break;
            }
            if n >= fft_size {
                self.history.copy_from_slice(&self.scratch[n - fft_size..n]);
            } else {
                self.history.copy_within(n.., 0);
                self.history[fft_size - n..].copy_from_slice(&self.scratch[..n]);
            }
            if n < self.scratch.len() {
                break;
            }
        }
    }
}

impl CaptureDevice for MicrophoneAnalyser {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn fft_size(&self) -> usize {
        self.analyser.config().fft_size
    }

    fn snapshot(&mut self) -> &[u8] {
        self.drain();
        self.analyser.analyse(&self.history)
    }
}
