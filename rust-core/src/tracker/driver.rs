//! Spectral analyzer driver
//!
//! Owns the capture device and the sample log. Each tick pulls one snapshot,
//! reduces it to a peak frequency and appends it with the session-relative
//! time. Ticks are driven externally (see [`super::scheduler::FrameLoop`]).

use super::device::CaptureDevice;
use super::error::{TrackerError, TrackerResult};
use super::sample_log::{RetentionPolicy, Sample, SampleLog};
use crate::audio::AudioError;
use crate::spectrum::extract_peak;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::time::Instant;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    /// Device released. A new start re-enters `Running`.
    Stopped,
}

impl DriverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverState::Idle => "idle",
            DriverState::Running => "running",
            DriverState::Stopped => "stopped",
        }
    }
}

pub struct PeakTracker<D> {
    state: DriverState,
    device: Option<D>,
    log: SampleLog,
    session_start: Option<Instant>,
    started_at: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl<D: CaptureDevice> PeakTracker<D> {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            state: DriverState::Idle,
            device: None,
            log: SampleLog::new(policy),
            session_start: None,
            started_at: None,
            status: None,
        }
    }

    /// Acquire a device and enter `Running`
    pub fn start_with<F>(&mut self, acquire: F) -> TrackerResult<()>
    where
        F: FnOnce() -> Result<D, AudioError>,
    {
        self.start_at(acquire, Instant::now())
    }

    /// Like [`start_with`](Self::start_with), with an explicit session start
    ///
    /// On acquisition failure the state is left unchanged and a readable
    /// status is kept until the next successful start. Starting while already
    /// running is a no-op.
    pub fn start_at<F>(&mut self, acquire: F, now: Instant) -> TrackerResult<()>
    where
        F: FnOnce() -> Result<D, AudioError>,
    {
        if self.state == DriverState::Running {
            debug!("start ignored: already running");
            return Ok(());
        }

        let device = match acquire() {
            Ok(device) => device,
            Err(e) => {
                let err = TrackerError::from(e);
                warn!("{}", err);
                self.status = Some(err.to_string());
                return Err(err);
            }
        };

        info!(
            "Session started ({} Hz, fft {}, {:.3} Hz/bin)",
            device.sample_rate(),
            device.fft_size(),
            device.bin_width()
        );

        // Elapsed time restarts at zero, so each session gets a fresh log
        self.log.clear();
        self.device = Some(device);
        self.session_start = Some(now);
        self.started_at = Some(Utc::now());
        self.status = None;
        self.state = DriverState::Running;
        Ok(())
    }

    /// Run one tick against the current time
    pub fn tick(&mut self) -> Option<Sample> {
        self.tick_at(Instant::now())
    }

    /// Run one tick; returns the appended sample, or `None` when not running
    pub fn tick_at(&mut self, now: Instant) -> Option<Sample> {
        if self.state != DriverState::Running {
            return None;
        }
        let (device, start) = match (self.device.as_mut(), self.session_start) {
            (Some(device), Some(start)) => (device, start),
            _ => return None,
        };

        let width = device.bin_width();
        let frequency_hz = extract_peak(device.snapshot(), width);

        let mut elapsed_seconds = now.saturating_duration_since(start).as_secs_f64();
        if let Some(last) = self.log.latest() {
            elapsed_seconds = elapsed_seconds.max(last.elapsed_seconds);
        }

        let sample = Sample::new(elapsed_seconds, frequency_hz);
        self.log.append(sample);
        Some(sample)
    }

    /// Release the device. Samples stay readable for export.
    pub fn stop(&mut self) {
        if self.state != DriverState::Running {
            return;
        }
        self.device = None;
        self.state = DriverState::Stopped;
        info!("Session stopped with {} samples", self.log.len());
    }

    /// Empty the log
    ///
    /// Refused (returns `false`) while running with a recording policy; the
    /// recording must be stopped first.
    pub fn clear(&mut self) -> bool {
        if self.state == DriverState::Running && self.log.policy() == RetentionPolicy::Recording {
            warn!("clear refused: stop recording first");
            return false;
        }
        self.log.clear();
        true
    }

    pub fn read_all(&self) -> Vec<Sample> {
        self.log.read_all()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.log.latest()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Human-readable status of the last failed start, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Wall-clock time of the current or last session start
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }
}
