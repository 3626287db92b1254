//! HTTP surface: the upload endpoint and the embedded static frontend.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::config::{AppConfig, UpstreamConfig, BODY_LIMIT_BYTES, MAX_UPLOAD_BYTES};
use crate::error::ApiError;
use crate::transcription::{self, UploadedAudio};

/// Shared per-request context. Cloning is cheap: the reqwest client is an
/// internal `Arc` and the config is wrapped in one.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream: Arc<UpstreamConfig>,
}

impl AppState {
    pub fn new(upstream: UpstreamConfig) -> Result<Self, String> {
        let http = transcription::build_http_client(&upstream)?;
        Ok(Self {
            http,
            upstream: Arc::new(upstream),
        })
    }
}

/// Success payload for `POST /api/transcription`.
#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/app.js", get(app_js))
        .route("/styles.css", get(styles_css))
        .route("/api/transcription", post(transcribe))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.upstream).map_err(anyhow::Error::msg)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("WaveToTxt listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install ctrl-c handler: {}", e);
    } else {
        log::info!("Shutdown requested");
    }
}

/// The one non-trivial contract: validate the upload, relay it to the Groq
/// API, and shape the response. Stateless per request; validation order is
/// fixed (missing file, then size, then credential) and short-circuits.
async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let audio = read_file_part(multipart).await?;

    if audio.bytes.len() > MAX_UPLOAD_BYTES {
        log::warn!(
            "Rejecting upload `{}`: {} bytes exceeds the {} byte limit",
            audio.filename,
            audio.bytes.len(),
            MAX_UPLOAD_BYTES
        );
        return Err(ApiError::file_too_large());
    }

    // No outbound call is ever attempted without a usable credential.
    let Some(api_key) = state.upstream.api_key() else {
        log::error!("GROQ_API_KEY is missing or still the placeholder value");
        return Err(ApiError::api_key_missing());
    };

    let text = transcription::transcribe_audio(&state.http, &state.upstream, api_key, audio).await?;

    Ok(Json(TranscriptionResponse {
        transcription: text,
    }))
}

/// Extract the `file` part from the multipart body. Any shape of absent
/// payload (no part, unreadable body, zero bytes) collapses to the same
/// client-facing 400.
async fn read_file_part(mut multipart: Multipart) -> Result<UploadedAudio, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::no_file()),
            Err(e) => {
                log::warn!("Unreadable multipart body: {}", e);
                return Err(ApiError::no_file());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "audio".to_string());

        let bytes = field.bytes().await.map_err(|e| {
            log::warn!("Failed to read upload `{}`: {}", filename, e);
            ApiError::no_file()
        })?;

        if bytes.is_empty() {
            return Err(ApiError::no_file());
        }

        return Ok(UploadedAudio {
            bytes: bytes.to_vec(),
            filename,
        });
    }
}

// The frontend is compiled into the binary so the app deploys as a single
// executable with no asset directory to ship.

async fn index_html() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("../static/index.html"),
    )
}

async fn app_js() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../static/app.js"),
    )
}

async fn styles_css() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../static/styles.css"),
    )
}
