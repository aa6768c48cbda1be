use crate::{CoreError, CoreResult, audio::TARGET_SAMPLE_RATE};

use std::{io::Cursor, panic::Location};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};

/// Encode 16 kHz mono float samples as an in-memory 16-bit PCM WAV file,
/// the format the transcription backend accepts.
///
/// # Errors
///
/// Returns [`CoreError::EncodingError`] if the writer fails, which for an
/// in-memory cursor only happens on header arithmetic overflow.
#[track_caller]
pub fn encode_wav(samples: &[f32]) -> CoreResult<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).map_err(|e| CoreError::EncodingError {
            reason: format!("Failed to create WAV writer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let scaled = (clamped * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(scaled)
            .map_err(|e| CoreError::EncodingError {
                reason: format!("Failed to write sample: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    writer.finalize().map_err(|e| CoreError::EncodingError {
        reason: format!("Failed to finalize WAV: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(cursor.into_inner())
}
