use crate::audio::{TARGET_SAMPLE_RATE, encode_wav};

use std::io::Cursor;

use hound::{SampleFormat, WavReader};

/// WHAT: Encoded audio is 16kHz mono 16-bit PCM with one WAV sample per input
/// WHY: The backend rejects anything but this exact format
#[test]
fn given_float_samples_when_encoded_then_expected_wav_format() {
    let samples = vec![0.0f32; 1600];

    let bytes = encode_wav(&samples).unwrap();

    let reader = WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, TARGET_SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);
    assert_eq!(reader.len(), 1600);
}

/// WHAT: Float amplitudes map onto the full i16 range and clamp past it
/// WHY: Out-of-range floats from a hot microphone must not wrap
#[test]
fn given_extreme_amplitudes_when_encoded_then_clamped_to_i16_range() {
    let samples = [1.0f32, -1.0, 2.0, -2.0, 0.0];

    let bytes = encode_wav(&samples).unwrap();

    let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(
        decoded,
        vec![i16::MAX, -i16::MAX, i16::MAX, -i16::MAX, 0]
    );
}

/// WHAT: Zero samples still encode to a parseable header
/// WHY: Aborted resampling or an instant release can produce empty buffers
#[test]
fn given_no_samples_when_encoded_then_valid_empty_wav() {
    let bytes = encode_wav(&[]).unwrap();

    let reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len(), 0);
    assert_eq!(reader.spec().sample_rate, TARGET_SAMPLE_RATE);
}
