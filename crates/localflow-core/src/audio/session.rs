use crate::{
    CoreResult,
    audio::{CaptureDevice, Resampler, TARGET_SAMPLE_RATE, encode_wav},
    hotkey::RecordingMode,
};

use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

/// Encoded result of a closed capture window.
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    /// 16 kHz mono 16-bit PCM WAV, empty when the session was aborted.
    pub wav_bytes: Vec<u8>,
    /// Wall-clock length of the capture window.
    pub duration: Duration,
    /// Error indicator: the device failed to open at start, nothing was
    /// buffered, and downstream should report rather than transcribe.
    pub aborted: bool,
}

/// Raw samples drained when a capture window closed.
///
/// [`RecordingSession::finish`] produces this on the fast path; the
/// resample and encode work lives in [`RawCapture::into_wav`] so callers
/// can run it away from their event loop.
#[derive(Debug, Clone)]
pub struct RawCapture {
    /// Drained samples at the device rate, empty when the session aborted.
    pub samples: Vec<f32>,
    /// Sample rate the buffer was captured at.
    pub sample_rate: u32,
    /// Wall-clock length of the capture window.
    pub duration: Duration,
    /// Error indicator: the device failed to open at start.
    pub aborted: bool,
}

impl RawCapture {
    /// Resample to the backend rate when the device rate differs, then
    /// encode as WAV. An aborted capture yields an empty buffer with the
    /// `aborted` flag set.
    ///
    /// # Errors
    ///
    /// Returns an error when resampling or WAV encoding fails.
    #[instrument(skip(self), fields(sample_count = self.samples.len()))]
    pub fn into_wav(self) -> CoreResult<CapturedAudio> {
        if self.aborted {
            return Ok(CapturedAudio {
                wav_bytes: Vec::new(),
                duration: self.duration,
                aborted: true,
            });
        }

        let prepared = if self.sample_rate != TARGET_SAMPLE_RATE {
            Resampler::new(self.sample_rate, TARGET_SAMPLE_RATE)?.resample(&self.samples)?
        } else {
            self.samples
        };

        let wav_bytes = encode_wav(&prepared)?;

        info!(wav_len = wav_bytes.len(), "captured audio encoded");

        Ok(CapturedAudio {
            wav_bytes,
            duration: self.duration,
            aborted: false,
        })
    }
}

/// One bounded capture window between chord press and release.
///
/// The hotkey state machine owns session lifetime: it opens exactly one at
/// `RecordStart` and finishes it at `RecordStop`. The session buffers no
/// audio itself: it drives the capture device and hands the drained buffer
/// out of `finish`, after which nothing is retained.
pub struct RecordingSession {
    mode: RecordingMode,
    translate: bool,
    started_at: Instant,
    aborted: bool,
}

impl RecordingSession {
    /// Open the capture window.
    ///
    /// A device-open failure is absorbed: the session is marked aborted and
    /// still finishes deterministically with an empty buffer, so a
    /// downstream failure can never wedge the caller in a recording state.
    #[instrument(skip(capturer))]
    pub fn open<C: CaptureDevice>(capturer: &mut C, mode: RecordingMode, translate: bool) -> Self {
        let aborted = match capturer.start() {
            Ok(()) => false,
            Err(e) => {
                warn!(error = %e, "audio device failed to open, session aborted");
                true
            }
        };

        info!(mode = mode.as_str(), translate, aborted, "recording session opened");

        Self {
            mode,
            translate,
            started_at: Instant::now(),
            aborted,
        }
    }

    /// Close the capture window, stopping the stream and draining samples.
    ///
    /// An aborted session touches the device no further and yields an empty
    /// sample buffer with the `aborted` flag set.
    ///
    /// # Errors
    ///
    /// Returns an error when the drained buffer cannot be read.
    #[instrument(skip(self, capturer))]
    pub fn finish<C: CaptureDevice>(self, capturer: &mut C) -> CoreResult<RawCapture> {
        let duration = self.started_at.elapsed();

        if self.aborted {
            return Ok(RawCapture {
                samples: Vec::new(),
                sample_rate: TARGET_SAMPLE_RATE,
                duration,
                aborted: true,
            });
        }

        let samples = capturer.stop()?;

        info!(
            mode = self.mode.as_str(),
            duration_ms = duration.as_millis(),
            sample_count = samples.len(),
            "recording session finished"
        );

        Ok(RawCapture {
            samples,
            sample_rate: capturer.sample_rate(),
            duration,
            aborted: false,
        })
    }

    /// Session mode from the matched binding.
    pub fn mode(&self) -> RecordingMode {
        self.mode
    }

    /// Translation flag snapshot taken at session start.
    pub fn translate(&self) -> bool {
        self.translate
    }

    /// Whether the device failed to open at start.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}
