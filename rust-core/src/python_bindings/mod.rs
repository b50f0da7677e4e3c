//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod audio_bindings;
mod spectrum_bindings;
mod tracker_bindings;

/// Python module definition
#[pymodule]
fn peak_tracker(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<tracker_bindings::PyPeakTracker>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyser>()?;
    m.add_class::<audio_bindings::PyAudioDeviceInfo>()?;

    m.add_function(wrap_pyfunction!(spectrum_bindings::extract_peak, m)?)?;
    m.add_function(wrap_pyfunction!(audio_bindings::list_input_devices, m)?)?;

    Ok(())
}
