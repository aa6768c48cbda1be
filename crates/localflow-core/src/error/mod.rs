use error_location::ErrorLocation;
use thiserror::Error;

/// Core errors for key handling, audio capture, and encoding,
/// with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No audio data captured or provided.
    #[error("No audio captured {location}")]
    NoAudioCaptured {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio resampling failed.
    #[error("Resampling error: {reason} {location}")]
    ResamplingError {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// WAV encoding failed.
    #[error("WAV encoding error: {reason} {location}")]
    EncodingError {
        /// Description of the encoding error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A hotkey chord string could not be parsed.
    #[error("Invalid hotkey chord {chord:?}: {reason} {location}")]
    InvalidChord {
        /// The chord string as configured.
        chord: String,
        /// Description of the parse failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
