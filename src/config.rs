//! Server configuration read from environment variables.
//!
//! A `.env` file is honored in development (loaded by `main` via dotenvy);
//! production deployments use real environment variables.

use std::net::SocketAddr;
use std::time::Duration;

/// Hard upper bound for an uploaded audio file, matching the Groq API limit.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Inbound body limit. Kept above `MAX_UPLOAD_BYTES` (plus multipart framing
/// overhead) so oversized uploads reach the handler and get our own 400
/// message instead of a framework-level 413.
pub const BODY_LIMIT_BYTES: usize = 32 * 1024 * 1024;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-large-v3";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Value shipped in `.env.example`; treated the same as an unset key.
const API_KEY_PLACEHOLDER: &str = "YOUR_GROQ_API_KEY_HERE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upstream: UpstreamConfig,
}

/// Everything the relay needs to reach the Groq transcription endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub model: String,
    /// Raw `GROQ_API_KEY` value as read from the environment. May be the
    /// unset placeholder; use [`UpstreamConfig::api_key`] to get a usable key.
    pub raw_api_key: Option<String>,
    pub request_timeout: Duration,
}

impl UpstreamConfig {
    /// The configured bearer credential, or `None` when the key is missing,
    /// empty, or still the `.env.example` placeholder. A `None` here is a
    /// server misconfiguration, not a client error.
    pub fn api_key(&self) -> Option<&str> {
        match self.raw_api_key.as_deref() {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Some(key),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for everything except the API key (which stays optional so
    /// the server can start and report the misconfiguration per request).
    pub fn from_env() -> Result<Self, String> {
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| format!("Invalid BIND_ADDR `{}`: {}", raw, e))?,
            Err(_) => DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address parses"),
        };

        let timeout_secs = match std::env::var("GROQ_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("Invalid GROQ_TIMEOUT_SECS `{}`: {}", raw, e))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            upstream: UpstreamConfig {
                api_url: std::env::var("GROQ_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                raw_api_key: std::env::var("GROQ_API_KEY").ok(),
                request_timeout: Duration::from_secs(timeout_secs.max(1)),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_with_key(key: Option<&str>) -> UpstreamConfig {
        UpstreamConfig {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            raw_api_key: key.map(str::to_string),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[test]
    fn missing_key_is_unconfigured() {
        assert_eq!(upstream_with_key(None).api_key(), None);
    }

    #[test]
    fn empty_key_is_unconfigured() {
        assert_eq!(upstream_with_key(Some("")).api_key(), None);
    }

    #[test]
    fn placeholder_key_is_unconfigured() {
        assert_eq!(upstream_with_key(Some("YOUR_GROQ_API_KEY_HERE")).api_key(), None);
    }

    #[test]
    fn real_key_is_returned() {
        assert_eq!(
            upstream_with_key(Some("gsk_test_123")).api_key(),
            Some("gsk_test_123")
        );
    }

    #[test]
    fn upload_limit_matches_groq_25mb() {
        assert_eq!(MAX_UPLOAD_BYTES, 26_214_400);
        assert!(BODY_LIMIT_BYTES > MAX_UPLOAD_BYTES);
    }
}
