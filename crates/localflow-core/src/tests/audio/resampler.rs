use crate::audio::{Resampler, TARGET_SAMPLE_RATE};

const CAPTURE_RATE: u32 = 48_000;
const ONE_SECOND_IN: usize = CAPTURE_RATE as usize;
const ONE_SECOND_OUT: usize = TARGET_SAMPLE_RATE as usize;
const LENGTH_TOLERANCE: u64 = 100;

/// WHAT: One second of 48kHz audio becomes roughly one second at 16kHz
/// WHY: The backend requires 16kHz input; length drift means pitch drift
#[test]
fn given_one_second_at_48khz_when_resampled_then_one_second_at_16khz() {
    let mut resampler = Resampler::new(CAPTURE_RATE, TARGET_SAMPLE_RATE).unwrap();
    let input = vec![0.5f32; ONE_SECOND_IN];

    let output = resampler.resample(&input).unwrap();

    assert!(
        (output.len() as i64 - ONE_SECOND_OUT as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "expected ~{ONE_SECOND_OUT} samples, got {}",
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite()));
}

/// WHAT: Empty input yields empty output without touching the FFT
/// WHY: Very short holds can drain zero samples
#[test]
fn given_no_samples_when_resampled_then_no_output() {
    let mut resampler = Resampler::new(CAPTURE_RATE, TARGET_SAMPLE_RATE).unwrap();
    let output = resampler.resample(&[]).unwrap();
    assert!(output.is_empty());
}

/// WHAT: A tone survives resampling with bounded amplitude
/// WHY: Guards against windowing artifacts blowing up sample values
#[test]
fn given_sine_tone_when_resampled_then_amplitude_bounded() {
    let mut resampler = Resampler::new(CAPTURE_RATE, TARGET_SAMPLE_RATE).unwrap();
    let input: Vec<f32> = (0..9600).map(|i| (i as f32 * 0.05).sin()).collect();

    let output = resampler.resample(&input).unwrap();

    let expected = 9600 / 3;
    assert!(
        (output.len() as i64 - expected as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "expected ~{expected} samples, got {}",
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite() && s.abs() <= 1.5));
}

/// WHAT: Input shorter than one FFT chunk still resamples
/// WHY: The final partial chunk path zero-pads; a sub-chunk buffer is all
/// padding path
#[test]
fn given_sub_chunk_input_when_resampled_then_proportional_output() {
    let mut resampler = Resampler::new(CAPTURE_RATE, TARGET_SAMPLE_RATE).unwrap();
    let input = vec![0.1f32; 300];

    let output = resampler.resample(&input).unwrap();

    assert_eq!(output.len(), 100);
    assert!(output.iter().all(|&s| s.is_finite()));
}
