//! FFT engine using realfft for real-valued signals
//!
//! Buffers are allocated once per engine; the per-tick path does not allocate.

use log::error;
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft uses it as scratch)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum, fft_size/2 + 1 bins)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute |X[k]| / N for the first `out.len()` bins
    ///
    /// `signal` is zero-padded or truncated to `fft_size`. `out` may be at most
    /// `fft_size/2 + 1` long; extra entries are left untouched.
    pub fn compute_normalized_magnitude(&mut self, signal: &[f64], out: &mut [f64]) {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        if let Err(e) = self
            .r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
        {
            // Only reachable on a buffer length mismatch
            error!("FFT processing failed: {}", e);
            out.fill(0.0);
            return;
        }

        let scale = 1.0 / self.fft_size as f64;
        for (o, c) in out.iter_mut().zip(self.output_buffer.iter()) {
            *o = c.norm() * scale;
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);
        let mut mags = vec![0.0; fft.num_bins()];

        fft.compute_normalized_magnitude(&vec![1.0; 1024], &mut mags);

        // Full-length DC of amplitude 1 lands entirely in bin 0
        assert!((mags[0] - 1.0).abs() < 1e-9);
        assert!(mags[10] < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1024);
        let mut mags = vec![0.0; fft.num_bins()];

        // Exactly on bin 64
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 64.0 * n as f64 / 1024.0).sin())
            .collect();
        fft.compute_normalized_magnitude(&signal, &mut mags);

        let (peak_bin, &peak_mag) = mags
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();

        assert_eq!(peak_bin, 64);
        // A unit sine splits into two bins of N/2; normalized that is 0.5
        assert!((peak_mag - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_signal_is_zero_padded() {
        let mut fft = FftEngine::new(16);
        let mut mags = vec![0.0; 9];

        fft.compute_normalized_magnitude(&[1.0; 4], &mut mags);
        assert!((mags[0] - 0.25).abs() < 1e-12);
    }
}
