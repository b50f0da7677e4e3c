//! Live capture session
//!
//! One session owns the microphone stream, the driver and the tick loop.
//! Readers (chart, export) only ever get copies of the sample log.

use super::device::{CaptureDevice, MicrophoneAnalyser};
use super::driver::{DriverState, PeakTracker};
use super::error::{TrackerError, TrackerResult};
use super::export::{export_csv_file, TimeColumn};
use super::sample_log::{RetentionPolicy, Sample};
use super::scheduler::{frame_interval, FrameLoop, DEFAULT_FRAME_RATE_HZ};
use crate::audio::{AudioError, AudioInput, AudioRingBuffer};
use crate::spectrum::AnalyserConfig;
use log::{error, info, warn};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub analyser: AnalyserConfig,

    /// Rolling for a live monitor, recording for record-and-export
    pub retention: RetentionPolicy,

    /// Tick cadence in Hz
    pub frame_rate_hz: f64,

    /// Capture ring buffer size in mono samples
    pub ring_capacity: usize,

    /// Input device name; `None` uses the host default
    pub device_name: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            analyser: AnalyserConfig::default(),
            retention: RetentionPolicy::rolling(),
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            ring_capacity: 96000,
            device_name: None,
        }
    }
}

impl SessionConfig {
    /// Live monitor: rolling 60 s window
    pub fn live_monitor() -> Self {
        Self::default()
    }

    /// Record-and-export: unbounded until reset
    pub fn recorder() -> Self {
        Self {
            retention: RetentionPolicy::Recording,
            ..Self::default()
        }
    }
}

pub struct LiveSession {
    config: SessionConfig,
    tracker: Arc<Mutex<PeakTracker<MicrophoneAnalyser>>>,
    input: Option<AudioInput>,
    frame_loop: Option<FrameLoop>,
}

impl LiveSession {
    pub fn new(config: SessionConfig) -> Self {
        let tracker = PeakTracker::new(config.retention);

        Self {
            config,
            tracker: Arc::new(Mutex::new(tracker)),
            input: None,
            frame_loop: None,
        }
    }

    /// Open the microphone and start ticking; returns the device name
    pub fn start(&mut self) -> TrackerResult<String> {
        if let Some(input) = &self.input {
            return Ok(input.device_info().name.clone());
        }

        let mut acquired: Option<AudioInput> = None;
        {
            let mut tracker = lock_tracker(&self.tracker);
            let config = &self.config;
            tracker.start_with(|| {
                let (input, device) = open_microphone(config)?;
                acquired = Some(input);
                Ok(device)
            })?;
        }

        let input = match acquired {
            Some(input) => input,
            None => return Err(TrackerError::DeviceAcquisition(AudioError::NoDevice)),
        };
        let device_name = input.device_info().name.clone();
        self.input = Some(input);

        let interval = frame_interval(self.config.frame_rate_hz);
        match spawn_ticks(Arc::clone(&self.tracker), interval) {
            Ok(frame_loop) => self.frame_loop = Some(frame_loop),
            Err(e) => {
                error!("Failed to spawn tick loop: {}", e);
                self.stop();
                return Err(TrackerError::Io(e));
            }
        }

        info!("Tracking peak frequency on '{}'", device_name);
        Ok(device_name)
    }

    /// Cancel the tick loop and release the microphone
    pub fn stop(&mut self) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }

        lock_tracker(&self.tracker).stop();

        if let Some(input) = self.input.take() {
            if let Err(e) = input.pause() {
                warn!("Failed to pause input: {}", e);
            }
        }
    }

    /// Reset the log. Returns `false` if refused (recording still running).
    pub fn clear(&self) -> bool {
        lock_tracker(&self.tracker).clear()
    }

    pub fn samples(&self) -> Vec<Sample> {
        lock_tracker(&self.tracker).read_all()
    }

    pub fn latest(&self) -> Option<Sample> {
        lock_tracker(&self.tracker).latest()
    }

    pub fn state(&self) -> DriverState {
        lock_tracker(&self.tracker).state()
    }

    /// Persistent message from the last failed start
    pub fn status(&self) -> Option<String> {
        lock_tracker(&self.tracker).status().map(str::to_owned)
    }

    /// Export the current samples as CSV; refused when there are none
    pub fn export_csv(&self, path: &Path, wall_clock: bool) -> TrackerResult<()> {
        let (samples, started_at) = {
            let tracker = lock_tracker(&self.tracker);
            (tracker.read_all(), tracker.started_at())
        };

        let column = match (wall_clock, started_at) {
            (true, Some(session_start)) => TimeColumn::WallClock { session_start },
            _ => TimeColumn::Elapsed,
        };
        export_csv_file(&samples, path, column)
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lock the driver, recovering it if a tick panicked while holding the lock
fn lock_tracker<D>(tracker: &Mutex<PeakTracker<D>>) -> MutexGuard<'_, PeakTracker<D>> {
    match tracker.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Tick `tracker` every `interval` until cancelled or the driver leaves
/// `Running`
fn spawn_ticks<D>(
    tracker: Arc<Mutex<PeakTracker<D>>>,
    interval: Duration,
) -> std::io::Result<FrameLoop>
where
    D: CaptureDevice + Send + 'static,
{
    FrameLoop::spawn(interval, move || lock_tracker(&tracker).tick().is_some())
}

fn open_microphone(
    config: &SessionConfig,
) -> Result<(AudioInput, MicrophoneAnalyser), AudioError> {
    let (producer, consumer) = AudioRingBuffer::new(config.ring_capacity).split();

    let input = match &config.device_name {
        Some(name) => AudioInput::from_device_name(name, producer)?,
        None => AudioInput::from_default_device(producer)?,
    };
    input.start()?;

    let sample_rate = f64::from(input.device_info().sample_rate);
    let device = MicrophoneAnalyser::new(consumer, sample_rate, config.analyser.clone());
    Ok((input, device))
}
