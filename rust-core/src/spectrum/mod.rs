//! Spectral analysis: byte magnitude snapshots and peak extraction

pub mod analyser;
pub mod fft;
pub mod peak;
pub mod windowing;

pub use analyser::{AnalyserConfig, ByteSpectrumAnalyser};
pub use fft::FftEngine;
pub use peak::{bin_width, extract_peak};
pub use windowing::WindowType;
