//! Backend selection
//!
//! Builds the configured controller. When the audio device cannot be
//! opened we fall back to speech synthesis, and the other way round.

use crate::audio::{create_player, AudioBackendController};
use crate::config::Config;
use crate::playback::PlaybackController;
use crate::source::NarrationSource;
use crate::speech::{create_engine, SpeechBackendController, SpeechSettings};
use crate::{NarratorError, Result};
use log::info;
use std::fmt;
use std::str::FromStr;

/// Which narration backend drives playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Pre-recorded clip per language
    Audio,
    /// On-device speech synthesis of the message text
    Speech,
}

impl FromStr for BackendKind {
    type Err = NarratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "audio" | "clip" => Ok(BackendKind::Audio),
            "speech" | "tts" => Ok(BackendKind::Speech),
            other => Err(NarratorError::Config(format!(
                "Unknown backend '{}' (expected audio or speech)",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Audio => f.write_str("audio"),
            BackendKind::Speech => f.write_str("speech"),
        }
    }
}

fn build(
    kind: BackendKind,
    config: &Config,
    source: NarrationSource,
) -> Result<Box<dyn PlaybackController>> {
    match kind {
        BackendKind::Audio => {
            let player = create_player()?;
            Ok(Box::new(AudioBackendController::new(player, source)))
        }
        BackendKind::Speech => {
            let engine = create_engine()?;
            let settings = SpeechSettings::from_config(config);
            Ok(Box::new(SpeechBackendController::new(
                engine, source, settings,
            )))
        }
    }
}

/// Create the controller for `kind`, falling back to the other backend
pub fn create_controller(
    kind: BackendKind,
    config: &Config,
    source: NarrationSource,
) -> Result<Box<dyn PlaybackController>> {
    info!("Trying {} backend...", kind);
    let first = match build(kind, config, source.clone()) {
        Ok(controller) => {
            info!("✓ Successfully initialized {} backend", kind);
            return Ok(controller);
        }
        Err(e) => {
            info!("✗ {} backend unavailable: {}", kind, e);
            e
        }
    };

    let fallback = match kind {
        BackendKind::Audio => BackendKind::Speech,
        BackendKind::Speech => BackendKind::Audio,
    };
    info!("Trying {} backend...", fallback);
    match build(fallback, config, source) {
        Ok(controller) => {
            info!("✓ Successfully initialized {} backend", fallback);
            Ok(controller)
        }
        Err(e) => Err(NarratorError::BackendUnavailable(format!(
            "No narration backend available. Tried:\n\
             1. {} ({})\n\
             2. {} ({})",
            kind, first, fallback, e
        ))),
    }
}
