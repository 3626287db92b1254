pub mod config;
pub mod error;
pub mod server;
pub mod transcription;

pub use config::{AppConfig, UpstreamConfig, MAX_UPLOAD_BYTES};
pub use error::ApiError;
pub use server::{build_router, serve, AppState, TranscriptionResponse};
