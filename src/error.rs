//! Error types for the narrator

use std::io;
use thiserror::Error;

/// Main error type for the narrator
///
/// Controllers never hand these to the presentation layer: backend
/// failures are logged and resolve to `Idle`. The variants exist so that
/// adapters and configuration loading can report what went wrong.
#[derive(Error, Debug)]
pub enum NarratorError {
    /// A backend primitive (audio device, synthesis engine) is missing
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend reported a failure while narrating
    #[error("Narration failed: {0}")]
    Narration(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for narrator operations
pub type Result<T> = std::result::Result<T, NarratorError>;

impl From<String> for NarratorError {
    fn from(s: String) -> Self {
        NarratorError::Other(s)
    }
}

impl From<&str> for NarratorError {
    fn from(s: &str) -> Self {
        NarratorError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for NarratorError {
    fn from(e: serde_json::Error) -> Self {
        NarratorError::Other(format!("JSON error: {}", e))
    }
}
