use crate::{
    CoreResult,
    keys::{KeyIdentity, parse_chord},
};

use std::collections::BTreeSet;

/// What a recording session does with its transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    /// Transcript is delivered verbatim.
    Raw,
    /// Transcript is restructured from spoken formatting commands.
    Format,
}

impl RecordingMode {
    /// Wire-friendly name, used as the backend `mode` field and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingMode::Raw => "raw",
            RecordingMode::Format => "format",
        }
    }
}

/// What pressing a bound chord does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Hold to record, transcript delivered verbatim.
    Record(RecordingMode),
    /// Press to flip the translation flag for the next session.
    ToggleTranslation,
}

/// A configured chord: required modifiers plus one trigger key.
///
/// Bindings are built once at startup and immutable thereafter.
#[derive(Debug, Clone)]
pub struct HotkeyBinding {
    /// What the chord does.
    pub mode: BindingMode,
    /// Canonical modifier identities that must all be held.
    pub required_modifiers: BTreeSet<KeyIdentity>,
    /// The canonical key that completes the chord.
    pub trigger: KeyIdentity,
}

impl HotkeyBinding {
    /// Build a binding from a chord string like `"alt+z"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chord string cannot be parsed.
    pub fn from_chord(mode: BindingMode, chord: &str) -> CoreResult<Self> {
        let (required_modifiers, trigger) = parse_chord(chord)?;
        Ok(Self {
            mode,
            required_modifiers,
            trigger,
        })
    }

    /// Whether `pressed` completes this chord given the currently held
    /// modifier identities.
    pub(crate) fn matches(&self, pressed: KeyIdentity, held: &BTreeSet<KeyIdentity>) -> bool {
        pressed == self.trigger && self.required_modifiers.is_subset(held)
    }
}
