use crate::{
    AppError, AppResult,
    config::{default_format_chord, default_raw_chord, default_suppress_trigger,
             default_toggle_chord},
};

use std::panic::Location;

use error_location::ErrorLocation;
use localflow_core::hotkey::{BindingMode, HotkeyBinding, RecordingMode};
use serde::{Deserialize, Serialize};

/// Hotkey chord configuration.
///
/// Chords are written as `+`-separated tokens, modifiers first and exactly
/// one trigger key last, e.g. `"ctrl+shift+space"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Hold-to-record chord for verbatim transcripts.
    #[serde(default = "default_raw_chord")]
    pub raw: String,

    /// Hold-to-record chord for command-formatted transcripts.
    #[serde(default = "default_format_chord")]
    pub format: String,

    /// Press-to-toggle chord for the translation flag.
    #[serde(default = "default_toggle_chord")]
    pub toggle_translation: String,

    /// Swallow matched trigger keystrokes so they do not reach the focused
    /// application. Requires elevated input permissions on some platforms.
    #[serde(default = "default_suppress_trigger")]
    pub suppress_trigger: bool,
}

impl HotkeyConfig {
    /// Compile the configured chord strings into a binding table.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the offending chord when any string
    /// fails to parse.
    #[track_caller]
    pub fn bindings(&self) -> AppResult<Vec<HotkeyBinding>> {
        let table = [
            (BindingMode::Record(RecordingMode::Raw), &self.raw),
            (BindingMode::Record(RecordingMode::Format), &self.format),
            (BindingMode::ToggleTranslation, &self.toggle_translation),
        ];

        table
            .into_iter()
            .map(|(mode, chord)| {
                HotkeyBinding::from_chord(mode, chord).map_err(|e| AppError::Config {
                    reason: format!("Invalid hotkey chord {:?}: {}", chord, e),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .collect()
    }
}
