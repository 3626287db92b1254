//! Transcription relay for WaveToTxt
//!
//! This module handles speech-to-text transcription via the Groq whisper API.

mod groq;

pub use groq::{build_http_client, transcribe_audio, TranscriptionError, UploadedAudio};
