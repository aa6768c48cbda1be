use localflow_core::hotkey::HotkeyAction;

use uuid::Uuid;

/// Commands sent from the input hook and timers to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// A hotkey state-machine transition produced this action.
    Hotkey(HotkeyAction),
    /// A session hit its duration cap. Ignored if the session already ended.
    SessionTimeout {
        /// Id of the session the timer was armed for.
        session_id: Uuid,
    },
    /// The input hook terminated; stop the event loop.
    Shutdown,
}
