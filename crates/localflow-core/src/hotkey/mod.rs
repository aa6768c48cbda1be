//! Hotkey chord tracking and the press/hold/release state machine.

mod binding;
mod machine;

pub use {
    binding::{BindingMode, HotkeyBinding, RecordingMode},
    machine::{HotkeyAction, HotkeyMachine, Outcome},
};
