//! Time-ordered log of peak-frequency samples
//!
//! Two retention policies share one type: a rolling window for live display
//! and an unbounded log for record-and-export.

use log::warn;
use std::collections::VecDeque;

/// Default rolling window, in seconds
pub const DEFAULT_WINDOW_SECONDS: f64 = 60.0;

/// One tick's result. Immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the session started
    pub elapsed_seconds: f64,
    pub frequency_hz: f64,
}

impl Sample {
    pub fn new(elapsed_seconds: f64, frequency_hz: f64) -> Self {
        Self {
            elapsed_seconds,
            frequency_hz,
        }
    }
}

/// How long samples are retained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetentionPolicy {
    /// Drop samples older than `window_seconds` behind the latest one
    Rolling { window_seconds: f64 },

    /// Keep everything until cleared
    Recording,
}

impl RetentionPolicy {
    pub fn rolling() -> Self {
        RetentionPolicy::Rolling {
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }

    /// Rolling window of `window_seconds`; `None` unless finite and positive
    pub fn rolling_for(window_seconds: f64) -> Option<Self> {
        if window_seconds.is_finite() && window_seconds > 0.0 {
            Some(RetentionPolicy::Rolling { window_seconds })
        } else {
            None
        }
    }

    /// Same policy, with an unusable rolling window replaced by the default
    fn sanitized(self) -> Self {
        match self {
            RetentionPolicy::Rolling { window_seconds } => Self::rolling_for(window_seconds)
                .unwrap_or_else(|| {
                    warn!(
                        "invalid rolling window {}s, using {}s",
                        window_seconds, DEFAULT_WINDOW_SECONDS
                    );
                    Self::rolling()
                }),
            RetentionPolicy::Recording => RetentionPolicy::Recording,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::rolling()
    }
}

#[derive(Debug, Clone)]
pub struct SampleLog {
    samples: VecDeque<Sample>,
    policy: RetentionPolicy,
}

impl SampleLog {
    /// A rolling window that is not finite and positive falls back to
    /// [`DEFAULT_WINDOW_SECONDS`]
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            samples: VecDeque::new(),
            policy: policy.sanitized(),
        }
    }

    /// Append a sample, then evict from the front under a rolling policy
    ///
    /// Callers guarantee `elapsed_seconds` is not older than the last sample.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);

        if let RetentionPolicy::Rolling { window_seconds } = self.policy {
            let cutoff = sample.elapsed_seconds - window_seconds;
            while self
                .samples
                .front()
                .map_or(false, |oldest| oldest.elapsed_seconds < cutoff)
            {
                self.samples.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Current contents in time order
    pub fn read_all(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }
}

impl Default for SampleLog {
    fn default() -> Self {
        Self::new(RetentionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_evicts_stale_samples() {
        let mut log = SampleLog::new(RetentionPolicy::Rolling {
            window_seconds: 60.0,
        });

        // One sample every 0.5 s for 100 s
        for i in 0..=200 {
            log.append(Sample::new(i as f64 * 0.5, 440.0));
        }

        let latest = log.latest().unwrap().elapsed_seconds;
        assert_eq!(latest, 100.0);

        let samples = log.read_all();
        assert!(samples.iter().all(|s| s.elapsed_seconds >= latest - 60.0));
        // The sample exactly on the boundary is kept
        assert_eq!(samples[0].elapsed_seconds, 40.0);
        assert_eq!(samples.len(), 121);
    }

    #[test]
    fn test_rolling_keeps_everything_inside_window() {
        let mut log = SampleLog::new(RetentionPolicy::rolling());
        for i in 0..10 {
            log.append(Sample::new(i as f64, 100.0));
        }
        assert_eq!(log.len(), 10);
    }

    #[test]
    fn test_rolling_gap_evicts_all_but_latest() {
        let mut log = SampleLog::new(RetentionPolicy::Rolling { window_seconds: 1.0 });
        log.append(Sample::new(0.0, 1.0));
        log.append(Sample::new(0.5, 2.0));
        log.append(Sample::new(10.0, 3.0));

        assert_eq!(log.read_all(), vec![Sample::new(10.0, 3.0)]);
    }

    #[test]
    fn test_recording_is_unbounded() {
        let mut log = SampleLog::new(RetentionPolicy::Recording);
        for i in 0..5000 {
            log.append(Sample::new(i as f64, 100.0));
        }
        assert_eq!(log.len(), 5000);
        assert_eq!(log.read_all()[0].elapsed_seconds, 0.0);

        log.clear();
        for i in 0..3 {
            log.append(Sample::new(i as f64, 100.0));
        }
        assert_eq!(log.read_all().len(), 3);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = SampleLog::default();
        log.clear();
        assert!(log.read_all().is_empty());

        log.append(Sample::new(0.0, 10.0));
        log.append(Sample::new(0.1, 20.0));
        log.clear();
        assert!(log.read_all().is_empty());
        assert!(log.latest().is_none());
    }

    #[test]
    fn test_read_all_preserves_order() {
        let mut log = SampleLog::new(RetentionPolicy::Recording);
        log.append(Sample::new(0.0, 100.0));
        log.append(Sample::new(0.5, 200.0));
        log.append(Sample::new(1.0, 150.0));

        let freqs: Vec<f64> = log.read_all().iter().map(|s| s.frequency_hz).collect();
        assert_eq!(freqs, vec![100.0, 200.0, 150.0]);
        // Reading does not consume
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_rolling_for_rejects_unusable_windows() {
        assert_eq!(
            RetentionPolicy::rolling_for(5.0),
            Some(RetentionPolicy::Rolling { window_seconds: 5.0 })
        );
        assert_eq!(RetentionPolicy::rolling_for(0.0), None);
        assert_eq!(RetentionPolicy::rolling_for(-1.0), None);
        assert_eq!(RetentionPolicy::rolling_for(f64::NAN), None);
        assert_eq!(RetentionPolicy::rolling_for(f64::INFINITY), None);
    }

    #[test]
    fn test_negative_window_does_not_evict_new_samples() {
        let mut log = SampleLog::new(RetentionPolicy::Rolling {
            window_seconds: -1.0,
        });
        assert_eq!(log.policy(), RetentionPolicy::rolling());

        log.append(Sample::new(0.0, 100.0));
        log.append(Sample::new(0.5, 200.0));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_nan_window_still_bounds_the_log() {
        let mut log = SampleLog::new(RetentionPolicy::Rolling {
            window_seconds: f64::NAN,
        });
        assert_eq!(log.policy(), RetentionPolicy::rolling());

        for i in 0..1000 {
            log.append(Sample::new(i as f64, 100.0));
        }
        // 939..=999 fall inside the default 60 s window
        assert_eq!(log.len(), 61);
        assert_eq!(log.read_all()[0].elapsed_seconds, 939.0);
    }
}
