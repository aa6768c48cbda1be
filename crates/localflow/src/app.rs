use crate::{AppCommand, BackendClient, OutputDispatcher, config::Config};

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use localflow_core::{
    audio::{AudioCapturer, RawCapture, RecordingSession},
    hotkey::{HotkeyAction, HotkeyMachine, RecordingMode},
    transform::CommandTransformer,
};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Whether a closed capture window carries audio worth transcribing.
///
/// Aborted sessions and empty captures are absorbed here: they never reach
/// the backend.
pub(crate) fn worth_transcribing(raw: &RawCapture) -> bool {
    !raw.aborted && !raw.samples.is_empty()
}

/// The session currently holding the capture window, if any.
pub(crate) struct ActiveSession {
    pub(crate) id: Uuid,
    pub(crate) session: RecordingSession,
}

/// Main application state.
///
/// Runs on the async runtime thread and is the single consumer of the
/// command channel. The hotkey machine is shared with the input-hook
/// thread; everything else is owned here. Slow work after a session closes
/// (backend call, transform, paste) runs on spawned tasks so the loop stays
/// responsive to the next chord.
pub struct App {
    pub(crate) machine: Arc<StdMutex<HotkeyMachine>>,
    pub(crate) capturer: AudioCapturer,
    pub(crate) backend: Arc<BackendClient>,
    pub(crate) dispatcher: Arc<Mutex<OutputDispatcher>>,
    pub(crate) transformer: CommandTransformer,
    pub(crate) config: Arc<Config>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) session: Option<ActiveSession>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) {
        info!("LocalFlow starting");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AppCommand::Hotkey(HotkeyAction::RecordStart { mode, translate }) => {
                    self.start_session(mode, translate);
                }
                AppCommand::Hotkey(HotkeyAction::RecordStop { .. }) => {
                    self.finish_session().await;
                }
                AppCommand::Hotkey(HotkeyAction::ToggleTranslation { enabled }) => {
                    info!(enabled, "Translation flag toggled");
                }
                AppCommand::SessionTimeout { session_id } => {
                    self.handle_timeout(session_id).await;
                }
                AppCommand::Shutdown => {
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        info!("LocalFlow shut down");
    }

    /// Open a recording session and arm its duration-cap timer.
    ///
    /// A device-open failure is absorbed into an aborted session so the
    /// matching stop still finds a session to close; the machine never
    /// wedges in Recording over an audio error.
    #[instrument(skip(self))]
    fn start_session(&mut self, mode: RecordingMode, translate: bool) {
        if self.session.is_some() {
            warn!("RecordStart with a session already open, ignoring");
            return;
        }

        let session_id = Uuid::new_v4();
        let session = RecordingSession::open(&mut self.capturer, mode, translate);

        if session.is_aborted() {
            error!(session_id = %session_id, "Audio device failed to open, session aborted");
        } else {
            info!(session_id = %session_id, mode = mode.as_str(), "Recording started");
        }

        let cap = Duration::from_secs(self.config.behaviour.max_session_secs);
        let timeout_tx = self.command_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(cap).await;
            let _ = timeout_tx.send(AppCommand::SessionTimeout { session_id }).await;
        });

        self.session = Some(ActiveSession {
            id: session_id,
            session,
        });
    }

    /// Close the open session and hand its audio to the slow pipeline.
    ///
    /// Only stop-and-drain runs here; resampling and WAV encoding happen on
    /// the spawned task so the loop is ready for the next chord press.
    #[instrument(skip(self))]
    async fn finish_session(&mut self) {
        let Some(active) = self.session.take() else {
            warn!("RecordStop with no open session, ignoring");
            return;
        };

        let session_id = active.id;
        let mode = active.session.mode();
        let translate = active.session.translate();

        let raw = match active.session.finish(&mut self.capturer) {
            Ok(raw) => raw,
            Err(e) => {
                error!(session_id = %session_id, error = ?e, "Failed to close capture");
                return;
            }
        };

        if !worth_transcribing(&raw) {
            if raw.aborted {
                warn!(session_id = %session_id, "Aborted session closed, nothing to transcribe");
            } else {
                info!(session_id = %session_id, "No audio captured, skipping transcription");
            }
            return;
        }

        info!(
            session_id = %session_id,
            duration_ms = raw.duration.as_millis(),
            sample_count = raw.samples.len(),
            "Recording stopped"
        );

        let backend = Arc::clone(&self.backend);
        let dispatcher = Arc::clone(&self.dispatcher);
        let transformer = self.transformer.clone();
        let auto_paste = self.config.behaviour.auto_paste;

        tokio::spawn(async move {
            let start = std::time::Instant::now();

            // The FFT resample is CPU-bound, keep it off the async workers.
            let captured = match tokio::task::spawn_blocking(move || raw.into_wav()).await {
                Ok(Ok(captured)) => captured,
                Ok(Err(e)) => {
                    error!(session_id = %session_id, error = ?e, "Failed to encode audio");
                    return;
                }
                Err(e) => {
                    error!(session_id = %session_id, error = ?e, "Audio encoding task failed");
                    return;
                }
            };

            let tokens = match backend.transcribe(captured.wav_bytes, mode, translate).await {
                Ok(tokens) => tokens,
                Err(e) => {
                    error!(session_id = %session_id, error = ?e, "Transcription failed");
                    return;
                }
            };

            if tokens.is_empty() {
                info!(session_id = %session_id, "Empty transcript, nothing to deliver");
                return;
            }

            let text = match mode {
                RecordingMode::Format => transformer.transform(&tokens),
                RecordingMode::Raw => tokens.join(" "),
            };

            info!(
                session_id = %session_id,
                duration_ms = start.elapsed().as_millis(),
                text_len = text.len(),
                "Transcript ready"
            );

            let mut dispatcher = dispatcher.lock().await;
            if let Err(e) = dispatcher.deliver(&text, auto_paste).await {
                error!(session_id = %session_id, error = ?e, "Failed to deliver text");
            }
        });
    }

    /// Duration-cap timer fired: stop the session it was armed for.
    ///
    /// Timers from sessions that already ended carry a stale id and are
    /// ignored, so a cap can never cut short a later session.
    #[instrument(skip(self))]
    async fn handle_timeout(&mut self, session_id: Uuid) {
        let current = self.session.as_ref().is_some_and(|a| a.id == session_id);
        if !current {
            debug!(session_id = %session_id, "Stale session timeout, ignoring");
            return;
        }

        warn!(session_id = %session_id, "Session hit duration cap, force-stopping");

        // Reset the machine so the eventual chord release is a no-op.
        let _ = self
            .machine
            .lock()
            .unwrap_or_else(|e| {
                error!("Hotkey machine lock poisoned, recovering: {}", e);
                e.into_inner()
            })
            .force_stop();

        self.finish_session().await;
    }
}
