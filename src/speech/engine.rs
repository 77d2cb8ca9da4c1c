//! Speech engine abstraction
//!
//! The primitives the speech controller needs from a synthesis engine.
//! Engines report the lifecycle of each utterance through the
//! `EventSender` passed to `speak`, tagged with the handle's generation.

use crate::playback::{EventSender, Generation};
use crate::{NarratorError, Result};
use log::info;

/// Gender an engine reports for a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceGender {
    Female,
    Male,
}

/// A voice as enumerated by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub gender: Option<VoiceGender>,
    pub language: String,
}

impl VoiceInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: None,
            language: String::new(),
        }
    }

    pub fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Everything needed to synthesize one narration
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Multiple of the engine's normal rate
    pub rate: f32,
    /// Multiple of the engine's normal pitch
    pub pitch: f32,
    /// Language tag, e.g. `en-US`
    pub lang: String,
    /// `None` keeps the engine default voice
    pub voice: Option<VoiceInfo>,
}

/// On-device speech synthesis
pub trait SpeechEngine {
    /// Voices currently known to the engine; may be empty while loading
    fn voices(&mut self) -> Result<Vec<VoiceInfo>>;

    /// Enqueue an utterance as handle `generation`
    fn speak(&mut self, utterance: &Utterance, generation: Generation, events: &EventSender)
        -> Result<()>;

    /// Suspend the current utterance
    fn pause(&mut self) -> Result<()>;

    /// Continue a suspended utterance
    fn resume(&mut self) -> Result<()>;

    /// Drop everything queued or speaking
    fn cancel_all(&mut self) -> Result<()>;

    /// Whether the engine is producing an utterance (paused counts)
    fn is_speaking(&self) -> bool;

    fn is_paused(&self) -> bool;

    /// Whether the engine delivers start/end events for its utterances
    ///
    /// When it does not, the controller polls `is_speaking` to notice the end.
    fn reports_lifecycle(&self) -> bool {
        true
    }
}

/// Create the platform speech engine
pub fn create_engine() -> Result<Box<dyn SpeechEngine>> {
    use super::backends::native::NativeSpeechEngine;

    info!(
        "Creating native speech engine for platform: {}",
        std::env::consts::OS
    );
    match NativeSpeechEngine::new() {
        Ok(engine) => {
            info!("✓ Successfully initialized native TTS backend");
            Ok(Box::new(engine))
        }
        Err(e) => Err(NarratorError::BackendUnavailable(format!(
            "Failed to initialize speech backend for platform '{}': {}",
            std::env::consts::OS,
            e
        ))),
    }
}
