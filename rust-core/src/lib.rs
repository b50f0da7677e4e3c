//! Peak Tracker - real-time dominant-frequency tracking
//!
//! Captures microphone audio, reduces each animation frame to a single peak
//! frequency and keeps a time series for display and CSV export.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod audio;
pub mod spectrum;
pub mod tracker;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use spectrum::extract_peak;
pub use tracker::{LiveSession, PeakTracker, RetentionPolicy, Sample, SampleLog, SessionConfig};
