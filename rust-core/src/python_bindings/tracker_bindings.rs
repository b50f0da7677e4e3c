//! Python bindings for the live peak tracker
//!
//! The Python UI plays the chart role: it polls `latest()` or `samples()` at
//! its own frame rate and never mutates the log.

use numpy::PyArray1;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::tracker::{
    default_file_name, peak_label, LiveSession, RetentionPolicy, SessionConfig, TrackerError,
};

impl From<TrackerError> for PyErr {
    fn from(err: TrackerError) -> PyErr {
        match err {
            TrackerError::DeviceAcquisition(_) => PyRuntimeError::new_err(err.to_string()),
            TrackerError::EmptyExport => PyValueError::new_err(err.to_string()),
            TrackerError::Io(_) => PyIOError::new_err(err.to_string()),
        }
    }
}

/// Live peak tracker exposed to Python
#[pyclass(name = "PeakTracker", unsendable)]
pub struct PyPeakTracker {
    session: LiveSession,
}

#[pymethods]
impl PyPeakTracker {
    /// Create a tracker
    ///
    /// Args:
    ///     recording: Keep every sample until reset instead of a 60 s window
    ///     window_seconds: Rolling window length (ignored when recording);
    ///         ValueError unless finite and positive
    ///     device_name: Input device; default device when omitted
    ///     frame_rate: Tick rate in Hz
    #[new]
    #[pyo3(signature = (recording=false, window_seconds=60.0, device_name=None, frame_rate=60.0))]
    fn new(
        recording: bool,
        window_seconds: f64,
        device_name: Option<String>,
        frame_rate: f64,
    ) -> PyResult<Self> {
        let retention = if recording {
            RetentionPolicy::Recording
        } else {
            RetentionPolicy::rolling_for(window_seconds).ok_or_else(|| {
                PyValueError::new_err(format!(
                    "window_seconds must be finite and positive, got {}",
                    window_seconds
                ))
            })?
        };
        let config = SessionConfig {
            retention,
            frame_rate_hz: frame_rate,
            device_name,
            ..SessionConfig::default()
        };

        Ok(Self {
            session: LiveSession::new(config),
        })
    }

    /// Start capture; returns the device name
    ///
    /// Raises RuntimeError if the microphone cannot be opened. The message is
    /// also kept in `status` until the next successful start.
    fn start(&mut self) -> PyResult<String> {
        Ok(self.session.start()?)
    }

    fn stop(&mut self) {
        self.session.stop();
    }

    /// Reset the samples; returns False while a recording is still running
    fn reset(&self) -> bool {
        self.session.clear()
    }

    /// All samples as (elapsed_seconds, frequency_hz) numpy arrays
    fn samples<'py>(&self, py: Python<'py>) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        let samples = self.session.samples();
        let times: Vec<f64> = samples.iter().map(|s| s.elapsed_seconds).collect();
        let freqs: Vec<f64> = samples.iter().map(|s| s.frequency_hz).collect();

        (PyArray1::from_vec(py, times), PyArray1::from_vec(py, freqs))
    }

    /// Latest (elapsed_seconds, frequency_hz), or None
    fn latest(&self) -> Option<(f64, f64)> {
        self.session
            .latest()
            .map(|s| (s.elapsed_seconds, s.frequency_hz))
    }

    /// Readout text for the latest peak, e.g. "Peak Frequency: 440.00 Hz"
    fn label(&self) -> Option<String> {
        self.session.latest().map(|s| peak_label(s.frequency_hz))
    }

    /// Write the samples as CSV
    ///
    /// Args:
    ///     path: Target file; `frequency_data_<timestamp>.csv` when omitted
    ///     wall_clock: Use the Timestamp,Frequency layout
    ///
    /// Raises ValueError (and writes nothing) when there is no data.
    #[pyo3(signature = (path=None, wall_clock=false))]
    fn export_csv(&self, path: Option<PathBuf>, wall_clock: bool) -> PyResult<String> {
        let path = path.unwrap_or_else(|| PathBuf::from(default_file_name(chrono::Utc::now())));
        self.session.export_csv(&path, wall_clock)?;
        Ok(path.display().to_string())
    }

    #[getter]
    fn state(&self) -> &'static str {
        self.session.state().as_str()
    }

    #[getter]
    fn status(&self) -> Option<String> {
        self.session.status()
    }

    #[getter]
    fn sample_count(&self) -> usize {
        self.session.samples().len()
    }
}
