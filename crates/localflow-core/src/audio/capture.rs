use crate::{CoreError, CoreResult};

use std::{
    collections::VecDeque,
    panic::Location,
    sync::{
        atomic::{AtomicBool, Ordering},
        {Arc, Mutex},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Maximum samples to buffer (5 minutes at 48kHz mono).
/// Bounds memory growth if a stop event is ever missed.
pub(crate) const MAX_BUFFER_SAMPLES: usize = 48_000 * 60 * 5;

/// A capture device a recording session can drive.
///
/// [`AudioCapturer`] is the cpal implementation; sessions stay generic over
/// this seam.
pub trait CaptureDevice {
    /// Begin streaming samples into the internal buffer.
    ///
    /// # Errors
    ///
    /// Returns an error when the device cannot be opened or started.
    fn start(&mut self) -> CoreResult<()>;

    /// Stop streaming and drain the captured samples, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the drained buffer cannot be read.
    fn stop(&mut self) -> CoreResult<Vec<f32>>;

    /// Native sample rate of the device.
    fn sample_rate(&self) -> u32;
}

/// Microphone capture with a bounded in-memory sample buffer.
///
/// Chunks are appended in arrival order by the device callback; `stop()`
/// drains them. One capturer serves many sessions, but only one capture
/// window may be open at a time — the caller enforces that.
pub struct AudioCapturer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    /// Signals the device callback to stop writing. Set before the stream is
    /// dropped so no in-flight callback writes after `stop()` takes the lock.
    shutdown: Arc<AtomicBool>,
}

impl AudioCapturer {
    /// Open the named input device, or the host default when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when no input device is available or its
    /// configuration cannot be read. Never hangs.
    #[track_caller]
    #[instrument]
    pub fn new(preferred_device: Option<&str>) -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = match preferred_device {
            Some(name) => host
                .input_devices()
                .map_err(|e| CoreError::DeviceError {
                    reason: format!("Failed to enumerate input devices: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?
                .find(|d| d.name().is_ok_and(|n| n == name))
                .ok_or(CoreError::NoMicrophoneFound {
                    location: ErrorLocation::from(Location::caller()),
                })?,
            None => host
                .default_input_device()
                .ok_or(CoreError::NoMicrophoneFound {
                    location: ErrorLocation::from(Location::caller()),
                })?,
        };

        let config = device
            .default_input_config()
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to get device config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "AudioCapturer initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            samples: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_BUFFER_SAMPLES))),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start streaming chunks into the buffer.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);

        self.shutdown.store(false, Ordering::Release);

        samples
            .lock()
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .clear();

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // Recover from lock poison rather than dropping audio;
                    // the VecDeque itself is still valid.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    buf.extend(data.iter().copied());
                    while buf.len() > MAX_BUFFER_SAMPLES {
                        buf.pop_front();
                    }
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CoreError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!("Audio capture started");

        Ok(())
    }

    /// Stop streaming and drain the captured samples, possibly empty.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<Vec<f32>> {
        // Flag first: even if a backend's Stream::drop returns before the
        // final callback, the callback observes the flag and bails out.
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            std::thread::sleep(std::time::Duration::from_millis(5));
            info!("Audio capture stopped");
        }

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .drain(..)
            .collect();

        debug!(sample_count = samples.len(), "Captured audio samples");

        Ok(samples)
    }

    /// Native sample rate of the capture device.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}

impl CaptureDevice for AudioCapturer {
    fn start(&mut self) -> CoreResult<()> {
        AudioCapturer::start(self)
    }

    fn stop(&mut self) -> CoreResult<Vec<f32>> {
        AudioCapturer::stop(self)
    }

    fn sample_rate(&self) -> u32 {
        AudioCapturer::sample_rate(self)
    }
}
