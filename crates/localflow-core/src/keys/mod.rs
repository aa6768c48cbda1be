//! Canonical key identities for hotkey matching.
//!
//! The OS hook layer is permitted to allocate distinct event objects for the
//! press and release of the same physical key, so hotkey matching must never
//! compare raw events. Everything is projected into [`KeyIdentity`] first and
//! compared by value from then on.

mod chord;

pub use chord::parse_chord;

use rdev::{EventType, Key};

/// Logical modifier keys, with left/right variants collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKey {
    /// Alt / Option.
    Alt,
    /// Control.
    Ctrl,
    /// Shift.
    Shift,
    /// Cmd / Windows / Super.
    Meta,
}

/// Canonical, comparable identity of a key.
///
/// Two events for the same physical key always normalize to equal identities,
/// regardless of how the platform layer represented them. Keys the platform
/// cannot name resolve to [`KeyIdentity::Unrecognized`], which never matches
/// any binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyIdentity {
    /// A modifier key, side-collapsed.
    Modifier(ModifierKey),
    /// A non-modifier key as a platform-independent code.
    Code(u32),
    /// Sentinel for keys that could not be mapped. Ignored by matching.
    Unrecognized,
}

impl KeyIdentity {
    /// Whether this identity is a modifier key.
    pub fn is_modifier(self) -> bool {
        matches!(self, KeyIdentity::Modifier(_))
    }
}

/// Press or release half of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    /// Key went down.
    Press,
    /// Key came up.
    Release,
}

/// A normalized key event as consumed by the hotkey state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Canonical identity of the key.
    pub identity: KeyIdentity,
    /// Press or release.
    pub direction: KeyDirection,
}

impl KeyEvent {
    /// Normalize a raw hook event. Non-keyboard events yield `None`.
    pub fn from_native(event_type: &EventType) -> Option<Self> {
        match event_type {
            EventType::KeyPress(key) => Some(Self {
                identity: normalize(*key),
                direction: KeyDirection::Press,
            }),
            EventType::KeyRelease(key) => Some(Self {
                identity: normalize(*key),
                direction: KeyDirection::Release,
            }),
            _ => None,
        }
    }
}

/// Project a raw key onto its canonical identity.
///
/// Resolution order: raw platform keycodes are used directly; known modifier
/// representations collapse left/right variants into one logical modifier;
/// named keys map through a fixed table of stable codes; anything else is the
/// [`KeyIdentity::Unrecognized`] sentinel.
pub fn normalize(key: Key) -> KeyIdentity {
    use KeyIdentity::{Code, Modifier, Unrecognized};

    match key {
        // The hook exposed a raw virtual keycode: use it as-is.
        Key::Unknown(code) => Code(code),

        // Modifiers collapse to one identity per logical key.
        Key::Alt | Key::AltGr => Modifier(ModifierKey::Alt),
        Key::ControlLeft | Key::ControlRight => Modifier(ModifierKey::Ctrl),
        Key::ShiftLeft | Key::ShiftRight => Modifier(ModifierKey::Shift),
        Key::MetaLeft | Key::MetaRight => Modifier(ModifierKey::Meta),

        // Letters and digits use their ASCII uppercase value, which matches
        // the virtual keycodes most platforms report for them.
        Key::KeyA => Code(b'A' as u32),
        Key::KeyB => Code(b'B' as u32),
        Key::KeyC => Code(b'C' as u32),
        Key::KeyD => Code(b'D' as u32),
        Key::KeyE => Code(b'E' as u32),
        Key::KeyF => Code(b'F' as u32),
        Key::KeyG => Code(b'G' as u32),
        Key::KeyH => Code(b'H' as u32),
        Key::KeyI => Code(b'I' as u32),
        Key::KeyJ => Code(b'J' as u32),
        Key::KeyK => Code(b'K' as u32),
        Key::KeyL => Code(b'L' as u32),
        Key::KeyM => Code(b'M' as u32),
        Key::KeyN => Code(b'N' as u32),
        Key::KeyO => Code(b'O' as u32),
        Key::KeyP => Code(b'P' as u32),
        Key::KeyQ => Code(b'Q' as u32),
        Key::KeyR => Code(b'R' as u32),
        Key::KeyS => Code(b'S' as u32),
        Key::KeyT => Code(b'T' as u32),
        Key::KeyU => Code(b'U' as u32),
        Key::KeyV => Code(b'V' as u32),
        Key::KeyW => Code(b'W' as u32),
        Key::KeyX => Code(b'X' as u32),
        Key::KeyY => Code(b'Y' as u32),
        Key::KeyZ => Code(b'Z' as u32),
        Key::Num0 => Code(b'0' as u32),
        Key::Num1 => Code(b'1' as u32),
        Key::Num2 => Code(b'2' as u32),
        Key::Num3 => Code(b'3' as u32),
        Key::Num4 => Code(b'4' as u32),
        Key::Num5 => Code(b'5' as u32),
        Key::Num6 => Code(b'6' as u32),
        Key::Num7 => Code(b'7' as u32),
        Key::Num8 => Code(b'8' as u32),
        Key::Num9 => Code(b'9' as u32),

        Key::Space => Code(codes::SPACE),
        Key::Return => Code(codes::ENTER),
        Key::Tab => Code(codes::TAB),
        Key::Escape => Code(codes::ESCAPE),
        Key::Backspace => Code(codes::BACKSPACE),

        Key::Slash => Code(b'/' as u32),
        Key::BackSlash => Code(b'\\' as u32),
        Key::Comma => Code(b',' as u32),
        Key::Dot => Code(b'.' as u32),
        Key::SemiColon => Code(b';' as u32),
        Key::Quote => Code(b'\'' as u32),
        Key::Minus => Code(b'-' as u32),
        Key::Equal => Code(b'=' as u32),
        Key::LeftBracket => Code(b'[' as u32),
        Key::RightBracket => Code(b']' as u32),
        Key::BackQuote => Code(b'`' as u32),

        Key::F1 => Code(codes::F1),
        Key::F2 => Code(codes::F1 + 1),
        Key::F3 => Code(codes::F1 + 2),
        Key::F4 => Code(codes::F1 + 3),
        Key::F5 => Code(codes::F1 + 4),
        Key::F6 => Code(codes::F1 + 5),
        Key::F7 => Code(codes::F1 + 6),
        Key::F8 => Code(codes::F1 + 7),
        Key::F9 => Code(codes::F1 + 8),
        Key::F10 => Code(codes::F1 + 9),
        Key::F11 => Code(codes::F1 + 10),
        Key::F12 => Code(codes::F1 + 11),

        // Navigation, keypad, lock keys and anything else the hook names but
        // bindings have no use for: sentinel, never matched, never an error.
        _ => Unrecognized,
    }
}

/// Stable canonical codes for named non-printable keys.
pub mod codes {
    /// Space bar.
    pub const SPACE: u32 = 0x20;
    /// Enter / Return.
    pub const ENTER: u32 = 0x0D;
    /// Tab.
    pub const TAB: u32 = 0x09;
    /// Escape.
    pub const ESCAPE: u32 = 0x1B;
    /// Backspace.
    pub const BACKSPACE: u32 = 0x08;
    /// F1; F2..F12 follow consecutively.
    pub const F1: u32 = 0x70;
}
