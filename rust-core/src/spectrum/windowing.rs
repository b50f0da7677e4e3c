//! Windowing functions for spectral analysis
//!
//! Applied to the time-domain block before the FFT to reduce spectral leakage.
//! Windows are periodic (denominator N, not N-1), which is the form analyser
//! nodes use for block-by-block magnitude estimation.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/N) + 0.08*cos(4πn/N)
    /// Sidelobe attenuation: ~58 dB
    Blackman,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/N)
    Hann,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// Generate window coefficients w[n] for n = 0..length-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    let n_total = length as f64;

    match window_type {
        WindowType::Blackman => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / n_total;
                0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos()
            })
            .collect(),

        WindowType::Hann => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / n_total;
                0.5 - 0.5 * angle.cos()
            })
            .collect(),

        WindowType::Rectangular => vec![1.0; length],
    }
}

/// Multiply `signal` by precomputed `window` coefficients in place
pub fn apply_window_inplace(signal: &mut [f64], window: &[f64]) {
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}
