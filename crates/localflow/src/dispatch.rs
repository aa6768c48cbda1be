//! Clipboard integration and auto-paste.
//!
//! Delivers rendered transcripts to the cursor: copy to the clipboard, then
//! optionally simulate the platform paste shortcut into the active window.

use crate::{AppError, AppResult};

use std::panic::Location;
use std::time::Duration;

use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Delay between clipboard write and paste simulation.
///
/// The OS clipboard manager needs time to process the write before the
/// simulated paste reads it; too short and the paste gets stale content.
/// 50ms is reliable across Windows, macOS, and Linux desktops.
const CLIPBOARD_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Delay between key events in the paste simulation. Some applications and
/// input methods drop events spaced closer than this.
const KEY_EVENT_DELAY: Duration = Duration::from_millis(10);

/// Returns the platform-specific paste modifier key.
///
/// macOS uses Cmd (Meta), Windows and Linux use Ctrl.
fn paste_modifier() -> Key {
    #[cfg(target_os = "macos")]
    {
        Key::Meta
    }
    #[cfg(not(target_os = "macos"))]
    {
        Key::Control
    }
}

/// RAII guard that guarantees the paste modifier key is released when
/// dropped.
///
/// Owns the `Enigo` instance so all keyboard operations go through it. On
/// drop, releases the modifier with best-effort semantics; if the release
/// fails, the OS resets modifier state on the user's next physical
/// keystroke.
pub struct PasteKeyGuard {
    enigo: Enigo,
    modifier: Key,
}

impl PasteKeyGuard {
    /// Press the paste modifier and return a guard that releases it on drop.
    #[track_caller]
    pub(crate) fn new() -> AppResult<Self> {
        let modifier = paste_modifier();

        let mut enigo =
            Enigo::new(&Settings::default()).map_err(|e| AppError::AutoPasteFailed {
                reason: format!("Failed to create Enigo: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        enigo
            .key(modifier, Direction::Press)
            .map_err(|e| AppError::AutoPasteFailed {
                reason: format!("Failed to press paste modifier: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { enigo, modifier })
    }

    /// Access the underlying Enigo while the modifier is held.
    pub(crate) fn enigo_mut(&mut self) -> &mut Enigo {
        &mut self.enigo
    }
}

impl Drop for PasteKeyGuard {
    fn drop(&mut self) {
        let _ = self.enigo.key(self.modifier, Direction::Release);
    }
}

/// Output dispatcher for clipboard and auto-paste operations.
pub struct OutputDispatcher {
    pub(crate) clipboard: Clipboard,
}

impl OutputDispatcher {
    /// Create a new dispatcher.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::Clipboard {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("OutputDispatcher initialized");

        Ok(Self { clipboard })
    }

    /// Deliver text to the clipboard and optionally auto-paste it.
    ///
    /// Always copies to the clipboard first, so a paste failure still
    /// leaves the text one manual paste away.
    #[instrument(skip(self, text))]
    pub async fn deliver(&mut self, text: &str, auto_paste: bool) -> AppResult<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| AppError::Clipboard {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(text_len = text.len(), "Text copied to clipboard");

        if auto_paste {
            tokio::time::sleep(CLIPBOARD_SETTLE_DELAY).await;

            if let Err(e) = self.paste().await {
                warn!(error = ?e, "Auto-paste failed, but text is in clipboard");
                return Err(e);
            }
        }

        info!(
            text_len = text.len(),
            auto_pasted = auto_paste,
            "Text delivery complete"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn paste(&mut self) -> AppResult<()> {
        // Simulate the paste shortcut on a blocking thread: enigo is
        // synchronous and sleeps between key events. A fresh Enigo is built
        // inside the closure because Enigo is not Send and the closure must
        // be 'static; construction is cheap.
        //
        // PasteKeyGuard releases the modifier on drop even if pressing V
        // fails, so the keyboard is never left with a stuck modifier.
        let paste_result = tokio::task::spawn_blocking(|| {
            let mut guard = PasteKeyGuard::new()?;

            std::thread::sleep(KEY_EVENT_DELAY);

            guard
                .enigo_mut()
                .key(Key::Unicode('v'), Direction::Click)
                .map_err(|e| AppError::AutoPasteFailed {
                    reason: format!("Failed to press V: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            std::thread::sleep(KEY_EVENT_DELAY);

            // Guard drops here, releasing the modifier.
            Ok::<(), AppError>(())
        })
        .await
        .map_err(|e| AppError::AutoPasteFailed {
            reason: format!("Paste task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        paste_result?;

        debug!("Auto-paste simulated");

        Ok(())
    }
}
