use crate::config::{default_base_url, default_request_timeout_secs};

use serde::{Deserialize, Serialize};

/// Transcription backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the transcription service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Requests never hang past this bound.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}
