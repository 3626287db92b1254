//! HTTP error payloads returned to the upload client.
//!
//! Every failure shape is serialized as `{"message": "..."}` with an explicit
//! status code, so the frontend can display the message verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::transcription::TranscriptionError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn no_file() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "No file uploaded.".to_string(),
        }
    }

    pub fn file_too_large() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "File size exceeds the 25MB limit.".to_string(),
        }
    }

    pub fn api_key_missing() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "API key is not configured on the server.".to_string(),
        }
    }

    /// Fixed generic message for unexpected internal failures. Never carries
    /// internal detail to the client; the detail goes to the log instead.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal server error occurred during transcription.".to_string(),
        }
    }
}

impl From<TranscriptionError> for ApiError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Network(detail) => {
                log::error!("Transcription transport failure: {}", detail);
                Self::internal()
            }
            TranscriptionError::Upstream { status, reason } => Self {
                // Mirror the upstream status.
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: format!("Error from transcription service: {}", reason),
            },
            TranscriptionError::MalformedResponse(detail) => {
                log::error!("Unusable transcription response: {}", detail);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Failed to parse transcription response.".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "message": self.message,
            })),
        )
            .into_response()
    }
}
