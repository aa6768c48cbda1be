//! HTTP client for the transcription backend.
//!
//! The backend contract is deliberately narrow: one multipart POST carrying
//! the WAV file, the session mode, and the translate flag; one JSON reply
//! carrying the transcript text. Everything else about the service is out
//! of localflow's hands.

use crate::{AppError, AppResult, config::ServerConfig};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use localflow_core::hotkey::RecordingMode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for the transcription service named in the config.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client with the configured endpoint and request timeout.
    #[track_caller]
    pub fn new(config: &ServerConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Backend {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send one session's audio and return the transcript as a word stream.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] on connection failure, timeout, a
    /// non-success status, or an unparseable reply. Never hangs past the
    /// configured timeout.
    #[track_caller]
    #[instrument(skip(self, wav_bytes), fields(wav_len = wav_bytes.len()))]
    pub async fn transcribe(
        &self,
        wav_bytes: Vec<u8>,
        mode: RecordingMode,
        translate: bool,
    ) -> AppResult<Vec<String>> {
        let audio = Part::bytes(wav_bytes)
            .file_name("session.wav")
            .mime_str("audio/wav")
            .map_err(|e| AppError::Backend {
                reason: format!("Failed to build audio part: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let form = Form::new()
            .part("audio", audio)
            .text("mode", mode.as_str())
            .text("translate", translate.to_string());

        let url = format!("{}/transcribe", self.base_url);
        debug!(url = %url, "Sending transcription request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Backend {
                reason: format!("Transcription request failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend {
                reason: format!("Backend returned {}: {}", status, body),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let parsed: TranscriptionResponse =
            response.json().await.map_err(|e| AppError::Backend {
                reason: format!("Failed to parse backend reply: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let tokens: Vec<String> = parsed.text.split_whitespace().map(String::from).collect();

        info!(token_count = tokens.len(), "Transcription received");

        Ok(tokens)
    }
}
