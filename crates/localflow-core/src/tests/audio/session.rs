use crate::audio::{AudioCapturer, CaptureDevice, RecordingSession, TARGET_SAMPLE_RATE};
use crate::hotkey::RecordingMode;
use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Device that refuses to start, as when the microphone is unplugged.
struct DeadDevice {
    stop_calls: usize,
}

impl CaptureDevice for DeadDevice {
    fn start(&mut self) -> CoreResult<()> {
        Err(CoreError::DeviceError {
            reason: "device unplugged".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn stop(&mut self) -> CoreResult<Vec<f32>> {
        self.stop_calls += 1;
        Ok(Vec::new())
    }

    fn sample_rate(&self) -> u32 {
        48_000
    }
}

/// Device that hands back a fixed buffer at a configurable rate.
struct CannedDevice {
    samples: Vec<f32>,
    rate: u32,
}

impl CaptureDevice for CannedDevice {
    fn start(&mut self) -> CoreResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> CoreResult<Vec<f32>> {
        Ok(std::mem::take(&mut self.samples))
    }

    fn sample_rate(&self) -> u32 {
        self.rate
    }
}

/// WHAT: A failed device open yields an aborted session that still finishes
/// WHY: A dead microphone must never wedge the caller in a recording state
#[test]
fn given_failing_device_when_session_opened_then_aborted_and_finishes_empty() {
    let mut device = DeadDevice { stop_calls: 0 };

    // When: The session opens against a device that cannot start
    let session = RecordingSession::open(&mut device, RecordingMode::Raw, false);

    // Then: The session is marked aborted but otherwise usable
    assert!(session.is_aborted());
    assert_eq!(session.mode(), RecordingMode::Raw);

    // And: Finishing returns immediately with an empty buffer, no device call
    let raw = session.finish(&mut device).unwrap();
    assert!(raw.aborted);
    assert!(raw.samples.is_empty());
    assert_eq!(device.stop_calls, 0);

    // And: Encoding the aborted capture keeps the flag and stays empty
    let captured = raw.into_wav().unwrap();
    assert!(captured.aborted);
    assert!(captured.wav_bytes.is_empty());
}

/// WHAT: A 48 kHz capture is resampled to 16 kHz and encoded as WAV
/// WHY: The backend accepts one wire format regardless of device rate
#[test]
fn given_canned_48k_device_when_session_runs_then_wav_is_16k() {
    let mut device = CannedDevice {
        samples: vec![0.1; 4_800],
        rate: 48_000,
    };

    let session = RecordingSession::open(&mut device, RecordingMode::Format, true);
    assert!(!session.is_aborted());
    assert!(session.translate());

    let raw = session.finish(&mut device).unwrap();
    assert!(!raw.aborted);
    assert_eq!(raw.samples.len(), 4_800);
    assert_eq!(raw.sample_rate, 48_000);

    let captured = raw.into_wav().unwrap();
    assert!(!captured.aborted);

    let reader = hound::WavReader::new(std::io::Cursor::new(captured.wav_bytes)).unwrap();
    assert_eq!(reader.spec().sample_rate, TARGET_SAMPLE_RATE);
    assert_eq!(reader.len(), 1_600);
}

/// WHAT: A device already at the backend rate skips the resampler
/// WHY: Resampling at identical rates would only distort the signal
#[test]
fn given_device_at_target_rate_when_encoded_then_sample_count_unchanged() {
    let mut device = CannedDevice {
        samples: vec![0.25; 500],
        rate: TARGET_SAMPLE_RATE,
    };

    let session = RecordingSession::open(&mut device, RecordingMode::Raw, false);
    let captured = session.finish(&mut device).unwrap().into_wav().unwrap();

    let reader = hound::WavReader::new(std::io::Cursor::new(captured.wav_bytes)).unwrap();
    assert_eq!(reader.len(), 500);
}

/// WHAT: A session against the real device opens, finishes, and encodes
/// WHY: End-to-end check of the capture, resample, encode pipeline
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_default_device_when_session_runs_then_wav_produced() {
    // Given: A capturer on the default device
    let mut capturer = AudioCapturer::new(None).unwrap();

    // When: A short session runs
    let session = RecordingSession::open(&mut capturer, RecordingMode::Raw, false);
    assert_eq!(session.mode(), RecordingMode::Raw);
    assert!(!session.translate());
    assert!(!session.is_aborted());
    std::thread::sleep(std::time::Duration::from_millis(100));
    let captured = session.finish(&mut capturer).unwrap().into_wav().unwrap();

    // Then: The result carries a WAV buffer and the measured duration
    assert!(!captured.aborted);
    assert!(captured.duration.as_millis() >= 100);
    // At least the 44-byte RIFF header
    assert!(captured.wav_bytes.len() >= 44);
}

/// WHAT: Back-to-back sessions on one capturer stay independent
/// WHY: One capturer serves every session for the process lifetime
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_two_sessions_when_run_sequentially_then_no_state_leaks() {
    let mut capturer = AudioCapturer::new(None).unwrap();

    let first = RecordingSession::open(&mut capturer, RecordingMode::Raw, false);
    std::thread::sleep(std::time::Duration::from_millis(50));
    let first_audio = first.finish(&mut capturer).unwrap();

    let second = RecordingSession::open(&mut capturer, RecordingMode::Format, true);
    assert!(second.translate());
    std::thread::sleep(std::time::Duration::from_millis(50));
    let second_audio = second.finish(&mut capturer).unwrap();

    assert!(!first_audio.aborted);
    assert!(!second_audio.aborted);
}
