mod audio_config;
mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod server_config;

pub(crate) use {
    audio_config::AudioConfig, behaviour_config::BehaviourConfig, config::Config,
    hotkey_config::HotkeyConfig, server_config::ServerConfig,
};

pub(crate) const DEFAULT_RAW_CHORD: &str = "ctrl+shift+space";
pub(crate) const DEFAULT_FORMAT_CHORD: &str = "ctrl+shift+enter";
pub(crate) const DEFAULT_TOGGLE_CHORD: &str = "ctrl+shift+t";
pub(crate) const DEFAULT_SUPPRESS_TRIGGER: bool = true;
pub(crate) const DEFAULT_AUTO_PASTE: bool = true;
pub(crate) const DEFAULT_MAX_SESSION_SECS: u64 = 300;
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:7878";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) fn default_raw_chord() -> String {
    DEFAULT_RAW_CHORD.to_string()
}

pub(crate) fn default_format_chord() -> String {
    DEFAULT_FORMAT_CHORD.to_string()
}

pub(crate) fn default_toggle_chord() -> String {
    DEFAULT_TOGGLE_CHORD.to_string()
}

pub(crate) fn default_suppress_trigger() -> bool {
    DEFAULT_SUPPRESS_TRIGGER
}

pub(crate) fn default_auto_paste() -> bool {
    DEFAULT_AUTO_PASTE
}

pub(crate) fn default_max_session_secs() -> u64 {
    DEFAULT_MAX_SESSION_SECS
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
