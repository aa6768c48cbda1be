//! Global input hook feeding the hotkey state machine.
//!
//! Runs `rdev` on the main thread (macOS requires the event tap there) and
//! does three things per event: normalize, apply one machine transition
//! under a brief lock, and forward the resulting actions over the command
//! channel. No I/O, no blocking, nothing slow happens on this path.

use crate::{AppCommand, AppError, AppResult};

use std::{
    panic::Location,
    sync::{Arc, Mutex},
};

use error_location::ErrorLocation;
use localflow_core::{hotkey::HotkeyMachine, keys::KeyEvent};
use rdev::Event;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Run the input hook until the process exits.
///
/// With `suppress_trigger` the hook grabs events and swallows the ones the
/// machine consumed; otherwise it listens passively and consumed keystrokes
/// still reach the focused application.
///
/// # Errors
///
/// Returns [`AppError::Hook`] when the OS refuses the hook, typically for
/// missing accessibility or input-group permissions.
#[track_caller]
pub fn run(
    machine: Arc<Mutex<HotkeyMachine>>,
    command_tx: mpsc::Sender<AppCommand>,
    suppress_trigger: bool,
) -> AppResult<()> {
    info!(suppress_trigger, "input hook starting");

    if suppress_trigger {
        let handler = move |event: Event| handle(&machine, &command_tx, &event);
        rdev::grab(move |event| {
            if handler(event.clone()) { None } else { Some(event) }
        })
        .map_err(|e| AppError::Hook {
            reason: format!("Failed to grab input events: {:?}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    } else {
        let handler = move |event: Event| {
            handle(&machine, &command_tx, &event);
        };
        rdev::listen(handler).map_err(|e| AppError::Hook {
            reason: format!("Failed to listen for input events: {:?}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Apply one event to the machine and forward its actions.
///
/// Returns whether the machine consumed the event. Lock poisoning is
/// recovered the same way the capture buffer does it: the machine state
/// itself is still valid.
fn handle(
    machine: &Arc<Mutex<HotkeyMachine>>,
    command_tx: &mpsc::Sender<AppCommand>,
    event: &Event,
) -> bool {
    let Some(key_event) = KeyEvent::from_native(&event.event_type) else {
        return false;
    };

    let outcome = machine
        .lock()
        .unwrap_or_else(|e| {
            error!("Hotkey machine lock poisoned, recovering: {}", e);
            e.into_inner()
        })
        .handle(key_event);

    for action in outcome.actions {
        if command_tx.blocking_send(AppCommand::Hotkey(action)).is_err() {
            warn!("Command channel closed, dropping hotkey action");
        }
    }

    outcome.consume
}
