//! Python bindings for audio device discovery

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::audio::input::list_input_devices as list_devices;

/// Audio device information exposed to Python
#[pyclass(name = "AudioDeviceInfo")]
#[derive(Clone)]
pub struct PyAudioDeviceInfo {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub sample_rate: u32,
    #[pyo3(get)]
    pub channels: u16,
}

/// List available input devices
#[pyfunction]
pub fn list_input_devices() -> PyResult<Vec<PyAudioDeviceInfo>> {
    let devices = list_devices()
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to list devices: {}", e)))?;

    Ok(devices
        .into_iter()
        .map(|d| PyAudioDeviceInfo {
            name: d.name,
            sample_rate: d.sample_rate,
            channels: d.channels,
        })
        .collect())
}
