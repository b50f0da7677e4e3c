//! Frame-cadence tick loop on a dedicated worker thread
//!
//! Exactly one tick is in flight at a time. The running flag is the
//! cancellation token: it is checked before every reschedule, and `cancel`
//! joins the worker so an in-flight tick always finishes.

use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Display-refresh cadence used when none is configured
pub const DEFAULT_FRAME_RATE_HZ: f64 = 60.0;

pub fn frame_interval(frame_rate_hz: f64) -> Duration {
    if frame_rate_hz > 0.0 && frame_rate_hz.is_finite() {
        Duration::from_secs_f64(1.0 / frame_rate_hz)
    } else {
        Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE_HZ)
    }
}

pub struct FrameLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Spawn the worker. `tick` returns `false` to end the loop on its own.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> std::io::Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let worker_running = Arc::clone(&running);

        let handle = std::thread::Builder::new()
            .name("peak-tracker-ticks".into())
            .spawn(move || {
                let mut ticks: u64 = 0;
                while worker_running.load(Ordering::SeqCst) {
                    let started = Instant::now();
                    if !tick() {
                        worker_running.store(false, Ordering::SeqCst);
                        break;
                    }
                    ticks += 1;

                    if !worker_running.load(Ordering::SeqCst) {
                        break;
                    }
                    std::thread::sleep(interval.saturating_sub(started.elapsed()));
                }
                debug!("Frame loop exited after {} ticks", ticks);
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop scheduling ticks and wait for the current one to finish
    pub fn cancel(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Frame loop worker panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
