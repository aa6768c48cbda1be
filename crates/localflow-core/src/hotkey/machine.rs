//! The push-to-talk state machine.
//!
//! One instance owns all modifier and session tracking for the process. The
//! input hook locks it briefly per event and applies a transition; everything
//! slow (device open, capture stop, network) happens elsewhere, driven by the
//! returned [`HotkeyAction`]s.
//!
//! Hold tracking is driven entirely by canonical [`KeyIdentity`] values. A
//! release is matched against the *active chord's own identities*, never
//! against stored raw event objects — the platform layer may hand us a fresh
//! object for the release half of a key, and identity-based set membership is
//! what keeps a session from recording forever.

use crate::{
    hotkey::{BindingMode, HotkeyBinding, RecordingMode},
    keys::{KeyDirection, KeyEvent, KeyIdentity},
};

use std::collections::BTreeSet;

use tracing::{debug, info};

/// Actions the machine asks its owner to perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// A chord was completed: open a recording session.
    RecordStart {
        /// Session mode from the matched binding.
        mode: RecordingMode,
        /// Translation flag snapshot for this session.
        translate: bool,
    },
    /// Part of the active chord was released: close the session.
    RecordStop {
        /// Session mode, mirrored from the start action.
        mode: RecordingMode,
        /// Translation flag snapshot, mirrored from the start action.
        translate: bool,
    },
    /// The translation toggle chord was pressed.
    ToggleTranslation {
        /// New value of the persistent flag.
        enabled: bool,
    },
}

/// Result of feeding one normalized event to the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Actions to hand off to the slow-work owner, in order.
    pub actions: Vec<HotkeyAction>,
    /// Whether the hook should swallow the native event so it does not
    /// reach the focused application (platforms permitting).
    pub consume: bool,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Recording {
        mode: RecordingMode,
        trigger: KeyIdentity,
        required_modifiers: BTreeSet<KeyIdentity>,
        translate: bool,
    },
}

/// Push-to-talk state machine over canonical key events.
pub struct HotkeyMachine {
    bindings: Vec<HotkeyBinding>,
    /// Currently held modifier identities. Mutated only here.
    held_modifiers: BTreeSet<KeyIdentity>,
    state: State,
    /// Persistent translation flag, applied to the next session started.
    translate: bool,
}

impl HotkeyMachine {
    /// Create a machine over an immutable binding table.
    ///
    /// Bindings are matched most-specific first, so a chord that is a
    /// superset of another (alt+shift+z over alt+z) wins when both match.
    pub fn new(mut bindings: Vec<HotkeyBinding>) -> Self {
        bindings.sort_by_key(|b| std::cmp::Reverse(b.required_modifiers.len()));
        Self {
            bindings,
            held_modifiers: BTreeSet::new(),
            state: State::Idle,
            translate: false,
        }
    }

    /// Whether a session is currently open.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording { .. })
    }

    /// Current value of the persistent translation flag.
    pub fn translate(&self) -> bool {
        self.translate
    }

    /// Apply one normalized key event and return the resulting actions.
    ///
    /// Must be fast: this runs with the machine lock held on the input-hook
    /// path. It does no I/O and never blocks.
    pub fn handle(&mut self, event: KeyEvent) -> Outcome {
        match event.direction {
            KeyDirection::Press => self.handle_press(event.identity),
            KeyDirection::Release => self.handle_release(event.identity),
        }
    }

    /// Reset to `Idle` regardless of key state, returning the stop action
    /// for the interrupted session if one was open.
    ///
    /// Used for the defensive session-duration cap; held modifiers are kept
    /// so ordinary chords keep working afterwards.
    pub fn force_stop(&mut self) -> Option<HotkeyAction> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Recording {
                mode, translate, ..
            } => {
                info!(mode = mode.as_str(), "recording force-stopped");
                Some(HotkeyAction::RecordStop { mode, translate })
            }
            State::Idle => None,
        }
    }

    fn handle_press(&mut self, identity: KeyIdentity) -> Outcome {
        if identity == KeyIdentity::Unrecognized {
            return Outcome::default();
        }

        if identity.is_modifier() {
            self.held_modifiers.insert(identity);
        }

        // Translation toggle fires on press alone, in any state.
        if self.match_binding(identity, BindingMode::ToggleTranslation).is_some() {
            self.translate = !self.translate;
            info!(enabled = self.translate, "translation toggled");
            return Outcome {
                actions: vec![HotkeyAction::ToggleTranslation {
                    enabled: self.translate,
                }],
                consume: true,
            };
        }

        if let State::Recording { trigger, .. } = &self.state {
            // Key-repeat of the active trigger: idempotent no-op, still
            // swallowed so repeats do not leak into the focused app.
            if identity == *trigger {
                return Outcome {
                    actions: Vec::new(),
                    consume: true,
                };
            }
            // Conflicting chord presses are ignored until the session ends.
            debug!(?identity, "press ignored while recording");
            return Outcome::default();
        }

        let matched = self.bindings.iter().find_map(|b| match b.mode {
            BindingMode::Record(mode) if b.matches(identity, &self.held_modifiers) => {
                Some((mode, b.trigger, b.required_modifiers.clone()))
            }
            _ => None,
        });

        if let Some((mode, trigger, required_modifiers)) = matched {
            let translate = self.translate;
            self.state = State::Recording {
                mode,
                trigger,
                required_modifiers,
                translate,
            };
            info!(mode = mode.as_str(), translate, "recording chord pressed");
            return Outcome {
                actions: vec![HotkeyAction::RecordStart { mode, translate }],
                consume: true,
            };
        }

        Outcome::default()
    }

    fn handle_release(&mut self, identity: KeyIdentity) -> Outcome {
        let mut outcome = Outcome::default();

        // First qualifying release of either chord half ends the session.
        // Matching is by identity value against the chord's own keys.
        let stop = match &self.state {
            State::Recording {
                mode,
                trigger,
                required_modifiers,
                translate,
            } if identity == *trigger || required_modifiers.contains(&identity) => {
                Some((*mode, *translate, identity == *trigger))
            }
            _ => None,
        };

        if let Some((mode, translate, released_trigger)) = stop {
            self.state = State::Idle;
            info!(mode = mode.as_str(), "recording chord released");
            outcome.actions.push(HotkeyAction::RecordStop { mode, translate });
            // Swallow the trigger's release to match its swallowed press;
            // modifier releases pass through untouched.
            outcome.consume = released_trigger;
        }

        if identity.is_modifier() {
            self.held_modifiers.remove(&identity);
        }

        outcome
    }

    fn match_binding(&self, pressed: KeyIdentity, mode: BindingMode) -> Option<&HotkeyBinding> {
        self.bindings
            .iter()
            .find(|b| b.mode == mode && b.matches(pressed, &self.held_modifiers))
    }
}
