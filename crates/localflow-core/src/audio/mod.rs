//! Microphone capture, resampling, and WAV encoding for one recording
//! session at a time.

pub(crate) mod capture;
mod resampler;
mod session;
mod wav;

pub(crate) use resampler::Resampler;

pub use {
    capture::{AudioCapturer, CaptureDevice},
    session::{CapturedAudio, RawCapture, RecordingSession},
    wav::encode_wav,
};

/// Sample rate the backend expects, mono 16-bit PCM.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;
