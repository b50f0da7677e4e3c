//! Byte-magnitude spectrum analyser
//!
//! Turns the most recent `fft_size` time-domain samples into `fft_size / 2`
//! unsigned byte magnitudes: window, real FFT, 1/N scaling, exponential
//! smoothing over time, dB conversion, then a linear map of
//! `[min_decibels, max_decibels]` onto `0..=255`.

use super::fft::FftEngine;
use super::windowing::{apply_window_inplace, generate_window, WindowType};

/// Analyser configuration
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT size (power of two). Fixed per session, not exposed to end users.
    pub fft_size: usize,

    pub window_type: WindowType,

    /// Magnitude at or below this maps to byte 0
    pub min_decibels: f64,

    /// Magnitude at or above this maps to byte 255
    pub max_decibels: f64,

    /// Weight of the previous block's magnitude, in [0, 1). 0 disables smoothing.
    pub smoothing_time_constant: f64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window_type: WindowType::Blackman,
            min_decibels: -100.0,
            max_decibels: -30.0,
            smoothing_time_constant: 0.8,
        }
    }
}

/// Produces one byte snapshot per call, reusing all internal buffers
pub struct ByteSpectrumAnalyser {
    config: AnalyserConfig,
    fft_engine: FftEngine,
    window: Vec<f64>,
    block: Vec<f64>,
    magnitudes: Vec<f64>,
    smoothed: Vec<f64>,
    snapshot: Vec<u8>,
}

impl ByteSpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Self {
        let fft_size = config.fft_size;
        let bins = fft_size / 2;

        Self {
            fft_engine: FftEngine::new(fft_size),
            window: generate_window(config.window_type, fft_size),
            block: vec![0.0; fft_size],
            magnitudes: vec![0.0; bins],
            smoothed: vec![0.0; bins],
            snapshot: vec![0; bins],
            config,
        }
    }

    /// Analyse the latest block and return the byte snapshot
    ///
    /// `time_domain` should hold the most recent `fft_size` samples, oldest
    /// first; shorter input is zero-padded.
    pub fn analyse(&mut self, time_domain: &[f64]) -> &[u8] {
        let fft_size = self.config.fft_size;
        let copy_len = time_domain.len().min(fft_size);
        self.block[..copy_len].copy_from_slice(&time_domain[..copy_len]);
        self.block[copy_len..].fill(0.0);
        apply_window_inplace(&mut self.block, &self.window);

        self.fft_engine
            .compute_normalized_magnitude(&self.block, &mut self.magnitudes);

        let tau = self.config.smoothing_time_constant.clamp(0.0, 1.0);
        let db_range = self.config.max_decibels - self.config.min_decibels;
        let scale = if db_range > 0.0 { 255.0 / db_range } else { 0.0 };

        for ((smoothed, &mag), byte) in self
            .smoothed
            .iter_mut()
            .zip(self.magnitudes.iter())
            .zip(self.snapshot.iter_mut())
        {
            *smoothed = tau * *smoothed + (1.0 - tau) * mag;
            if !smoothed.is_finite() {
                *smoothed = 0.0;
            }
            *byte = to_byte(*smoothed, self.config.min_decibels, scale);
        }

        &self.snapshot
    }

    /// Last snapshot produced (all zeros before the first call)
    pub fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Number of byte bins per snapshot (fft_size / 2)
    pub fn num_bins(&self) -> usize {
        self.snapshot.len()
    }
}

fn to_byte(magnitude: f64, min_decibels: f64, scale: f64) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (scale * (db - min_decibels)).floor();
    scaled.clamp(0.0, 255.0) as u8
}
