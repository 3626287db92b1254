//! Groq whisper API client for speech-to-text transcription.
//!
//! Relays an uploaded audio file to the Groq transcription endpoint and
//! extracts the transcript from the JSON response. Format validity of the
//! audio itself is delegated entirely to the upstream API.

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::UpstreamConfig;

/// One uploaded audio file as received from the browser. Built once per
/// request and discarded when the response is written.
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug)]
pub enum TranscriptionError {
    /// The outbound call failed to complete (DNS, connect, timeout, ...).
    Network(String),
    /// Upstream answered with a non-success status.
    Upstream { status: u16, reason: String },
    /// Upstream answered 2xx but the body held no usable transcript.
    MalformedResponse(String),
}

impl std::fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptionError::Network(e) => write!(f, "Network error: {}", e),
            TranscriptionError::Upstream { status, reason } => {
                write!(f, "Transcription service error ({}): {}", status, reason)
            }
            TranscriptionError::MalformedResponse(e) => {
                write!(f, "Failed to parse transcription response: {}", e)
            }
        }
    }
}

impl std::error::Error for TranscriptionError {}

/// Build the shared outbound HTTP client. Reused across requests for
/// connection pooling; the timeout bounds the whole upstream call since
/// transcription of a 25MB file can take a while.
pub fn build_http_client(config: &UpstreamConfig) -> Result<Client, String> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Relay one audio file to the Groq transcription API.
///
/// Issues exactly one outbound call with the fixed decoding parameters
/// (`response_format=json`, `temperature=0`) and the configured model,
/// authorized with the bearer credential. No retries; every failure is
/// terminal for the request.
pub async fn transcribe_audio(
    client: &Client,
    config: &UpstreamConfig,
    api_key: &str,
    audio: UploadedAudio,
) -> Result<String, TranscriptionError> {
    log::info!(
        "Transcribing audio file: {} ({} bytes)",
        audio.filename,
        audio.bytes.len()
    );

    let file_part = Part::bytes(audio.bytes).file_name(audio.filename);

    let form = Form::new()
        .part("file", file_part)
        .text("model", config.model.clone())
        .text("response_format", "json")
        .text("temperature", "0");

    let response = client
        .post(&config.api_url)
        .bearer_auth(api_key)
        .multipart(form)
        .send()
        .await
        .map_err(|e| TranscriptionError::Network(e.to_string()))?;

    let status = response.status();

    if !status.is_success() {
        // Keep the upstream body for diagnostics; the client only ever sees
        // the status and reason phrase.
        let body = response.text().await.unwrap_or_default();
        log::error!("Groq API error ({}): {}", status.as_u16(), body);

        return Err(TranscriptionError::Upstream {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        });
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()))?;

    match extract_transcript(&body) {
        Some(text) => {
            log::info!("Transcription successful: {} chars", text.len());
            Ok(text)
        }
        None => Err(TranscriptionError::MalformedResponse(
            "response has no non-empty `text` field".to_string(),
        )),
    }
}

/// Pull the transcript out of the upstream JSON body. The field name is
/// matched case-insensitively (Groq normally sends `text`, but the contract
/// only promises the field up to casing); empty transcripts count as absent.
fn extract_transcript(body: &serde_json::Value) -> Option<String> {
    let object = body.as_object()?;
    object
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("text"))
        .and_then(|(_, value)| value.as_str())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
