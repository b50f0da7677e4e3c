//! Python bindings for spectrum analysis

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::spectrum::{self, AnalyserConfig, ByteSpectrumAnalyser};

/// Byte spectrum analyser exposed to Python
#[pyclass(name = "SpectrumAnalyser")]
pub struct PySpectrumAnalyser {
    analyser: ByteSpectrumAnalyser,
    sample_rate: f64,
}

#[pymethods]
impl PySpectrumAnalyser {
    /// Create a new analyser
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     smoothing: Smoothing time constant in [0, 1)
    #[new]
    #[pyo3(signature = (sample_rate=48000.0, smoothing=0.8))]
    fn new(sample_rate: f64, smoothing: f64) -> Self {
        let config = AnalyserConfig {
            smoothing_time_constant: smoothing,
            ..AnalyserConfig::default()
        };

        Self {
            analyser: ByteSpectrumAnalyser::new(config),
            sample_rate,
        }
    }

    /// Analyse the latest block of samples
    ///
    /// Returns:
    ///     Byte magnitudes (fft_size / 2) as a uint8 numpy array
    fn analyse<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<u8>> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let snapshot = self.analyser.analyse(sig);

        Ok(PyArray1::from_slice(py, snapshot))
    }

    /// Peak frequency in Hz of the last analysed block
    fn peak_frequency(&self) -> f64 {
        let width = spectrum::bin_width(self.sample_rate, self.analyser.config().fft_size);
        spectrum::extract_peak(self.analyser.snapshot(), width)
    }

    /// Width of one bin in Hz
    fn bin_width(&self) -> f64 {
        spectrum::bin_width(self.sample_rate, self.analyser.config().fft_size)
    }

    fn num_bins(&self) -> usize {
        self.analyser.num_bins()
    }
}

/// Frequency of the strongest bin (lowest bin wins ties; silence is 0 Hz)
#[pyfunction]
pub fn extract_peak(snapshot: PyReadonlyArray1<u8>, bin_width: f64) -> PyResult<f64> {
    let bytes = snapshot
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(spectrum::extract_peak(bytes, bin_width))
}
