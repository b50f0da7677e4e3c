//! Microphone capture with cpal

pub mod buffer;
pub mod input;

pub use buffer::AudioRingBuffer;
pub use input::{list_input_devices, AudioDeviceInfo, AudioError, AudioInput};
