//! Real-time peak tracking: driver, sample log, tick loop and export

pub mod device;
pub mod driver;
pub mod error;
pub mod export;
pub mod sample_log;
pub mod scheduler;
pub mod session;

pub use device::{CaptureDevice, MicrophoneAnalyser};
pub use driver::{DriverState, PeakTracker};
pub use error::{TrackerError, TrackerResult};
pub use export::{default_file_name, export_csv_file, peak_label, write_csv, TimeColumn};
pub use sample_log::{RetentionPolicy, Sample, SampleLog, DEFAULT_WINDOW_SECONDS};
pub use scheduler::FrameLoop;
pub use session::{LiveSession, SessionConfig};
