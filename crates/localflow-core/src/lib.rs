//! LocalFlow core library.
//!
//! The correctness-critical pieces of the push-to-talk dictation pipeline:
//! canonical key identities, the hotkey chord state machine, the bounded
//! recording session over CPAL, and the spoken-command text transformer.
//!
//! # Example
//!
//! ```no_run
//! use localflow_core::{
//!     hotkey::{BindingMode, HotkeyBinding, HotkeyMachine, RecordingMode},
//!     keys::{KeyDirection, KeyEvent, normalize},
//! };
//!
//! fn main() -> localflow_core::CoreResult<()> {
//!     let binding = HotkeyBinding::from_chord(
//!         BindingMode::Record(RecordingMode::Raw),
//!         "alt+z",
//!     )?;
//!     let mut machine = HotkeyMachine::new(vec![binding]);
//!
//!     let press = KeyEvent {
//!         identity: normalize(rdev::Key::Alt),
//!         direction: KeyDirection::Press,
//!     };
//!     let outcome = machine.handle(press);
//!     assert!(outcome.actions.is_empty());
//!     Ok(())
//! }
//! ```

pub mod audio;
mod error;
pub mod hotkey;
pub mod keys;
pub mod transform;

pub use error::{CoreError, Result as CoreResult};

#[cfg(test)]
mod tests;
