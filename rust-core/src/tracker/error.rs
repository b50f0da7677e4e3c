//! Errors surfaced by the tracker and its CSV export

use crate::audio::AudioError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Microphone unavailable or permission denied. Not retried.
    #[error("Microphone access failed: {0}. Check the input device and try again.")]
    DeviceAcquisition(#[from] AudioError),

    #[error("No data to export")]
    EmptyExport,

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
