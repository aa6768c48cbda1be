use crate::config::{default_auto_paste, default_max_session_secs};

use serde::{Deserialize, Serialize};

/// Application behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Whether to automatically paste transcribed text.
    #[serde(default = "default_auto_paste")]
    pub auto_paste: bool,

    /// Upper bound on one recording session, in seconds. A session still
    /// open at the cap is force-stopped as if the chord had been released.
    #[serde(default = "default_max_session_secs")]
    pub max_session_secs: u64,
}
