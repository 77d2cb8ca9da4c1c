//! Native Rust TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - WinRT/SAPI on Windows
//!
//! The tts crate reports utterance begin/end/stop through global callbacks
//! keyed by utterance id. We keep a table from utterance id to the handle
//! generation that requested it, and forward each callback as a lifecycle
//! event for that generation.

use crate::playback::{EventSender, Generation, LifecycleEvent};
use crate::speech::{SpeechEngine, Utterance, VoiceGender, VoiceInfo};
use crate::{NarratorError, Result};
use log::{debug, error, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tts::{Gender, Tts as TtsCrate, UtteranceId, Voice};

/// Utterances in flight, by tts id
type PendingMap = Arc<Mutex<HashMap<UtteranceId, (Generation, EventSender)>>>;

/// Native TTS engine using the tts crate
pub struct NativeSpeechEngine {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    pending: PendingMap,

    /// Speaking flag maintained from callbacks, for platforms that
    /// cannot answer `is_speaking` directly
    speaking: Arc<AtomicBool>,

    /// Voice active when the engine came up, restored when no voice resolves
    default_voice: Option<Voice>,
}

impl NativeSpeechEngine {
    /// Create a new native speech engine
    ///
    /// Initializes the platform-appropriate TTS backend and hooks the
    /// utterance callbacks when the platform supports them.
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default().map_err(|e| {
            NarratorError::BackendUnavailable(format!("Failed to initialize TTS: {}", e))
        })?;

        let features = tts.supported_features();
        let default_voice = if features.get_voice {
            tts.voice().ok().flatten()
        } else {
            None
        };

        let engine = Self {
            tts,
            pending: Arc::new(Mutex::new(HashMap::new())),
            speaking: Arc::new(AtomicBool::new(false)),
            default_voice,
        };

        if features.utterance_callbacks {
            engine.install_callbacks()?;
        } else {
            warn!("Utterance callbacks not supported; polling for natural end");
        }

        debug!("Native TTS backend created successfully");
        Ok(engine)
    }

    fn install_callbacks(&self) -> Result<()> {
        let pending = Arc::clone(&self.pending);
        let speaking = Arc::clone(&self.speaking);
        self.tts
            .on_utterance_begin(Some(Box::new(move |id| {
                if forward(&pending, id, LifecycleEvent::Started, false) {
                    speaking.store(true, Ordering::SeqCst);
                }
            })))
            .map_err(|e| NarratorError::Speech(format!("Failed to hook begin: {}", e)))?;

        let pending = Arc::clone(&self.pending);
        let speaking = Arc::clone(&self.speaking);
        self.tts
            .on_utterance_end(Some(Box::new(move |id| {
                if forward(&pending, id, LifecycleEvent::Ended, true) {
                    speaking.store(false, Ordering::SeqCst);
                }
            })))
            .map_err(|e| NarratorError::Speech(format!("Failed to hook end: {}", e)))?;

        let pending = Arc::clone(&self.pending);
        let speaking = Arc::clone(&self.speaking);
        self.tts
            .on_utterance_stop(Some(Box::new(move |id| {
                if forward(&pending, id, LifecycleEvent::Ended, true) {
                    speaking.store(false, Ordering::SeqCst);
                }
            })))
            .map_err(|e| NarratorError::Speech(format!("Failed to hook stop: {}", e)))?;

        Ok(())
    }

    /// Scale a multiple of the normal rate into the platform's range
    fn scaled_rate(&self, factor: f32) -> f32 {
        (self.tts.normal_rate() * factor).clamp(self.tts.min_rate(), self.tts.max_rate())
    }

    fn scaled_pitch(&self, factor: f32) -> f32 {
        (self.tts.normal_pitch() * factor).clamp(self.tts.min_pitch(), self.tts.max_pitch())
    }

    fn apply_voice(&mut self, wanted: Option<&VoiceInfo>) -> Result<()> {
        if !self.tts.supported_features().voice {
            return Ok(());
        }

        let voice = match wanted {
            Some(info) => self
                .tts
                .voices()
                .map_err(|e| NarratorError::Speech(format!("Failed to get voices: {}", e)))?
                .into_iter()
                .find(|v| v.id() == info.id),
            None => self.default_voice.clone(),
        };

        if let Some(voice) = voice {
            debug!("Selecting voice: {}", voice.name());
            self.tts
                .set_voice(&voice)
                .map_err(|e| NarratorError::Speech(format!("Failed to set voice: {}", e)))?;
        }
        Ok(())
    }
}

/// Hand a tts callback to whichever handle owns the utterance
///
/// Returns false when the id is not (or no longer) ours, e.g. the stop
/// callback of an utterance that `cancel_all` already forgot.
fn forward(pending: &PendingMap, id: UtteranceId, event: LifecycleEvent, done: bool) -> bool {
    let Ok(mut map) = pending.lock() else {
        error!("Utterance table poisoned, dropping {:?}", event);
        return false;
    };
    let target = if done {
        map.remove(&id)
    } else {
        map.get(&id).cloned()
    };
    match target {
        Some((generation, events)) => {
            events.emit(generation, event);
            true
        }
        None => {
            debug!("Callback for unknown utterance {:?}", id);
            false
        }
    }
}

fn voice_info(voice: &Voice) -> VoiceInfo {
    VoiceInfo {
        id: voice.id(),
        name: voice.name(),
        gender: voice.gender().map(|g| match g {
            Gender::Female => VoiceGender::Female,
            Gender::Male => VoiceGender::Male,
        }),
        language: voice.language().to_string(),
    }
}

impl SpeechEngine for NativeSpeechEngine {
    fn voices(&mut self) -> Result<Vec<VoiceInfo>> {
        if !self.tts.supported_features().voice {
            return Ok(Vec::new());
        }
        let voices = self
            .tts
            .voices()
            .map_err(|e| NarratorError::Speech(format!("Failed to get voices: {}", e)))?;
        Ok(voices.iter().map(voice_info).collect())
    }

    fn speak(
        &mut self,
        utterance: &Utterance,
        generation: Generation,
        events: &EventSender,
    ) -> Result<()> {
        if utterance.text.is_empty() {
            return Err(NarratorError::Narration("Empty utterance".to_string()));
        }

        let features = self.tts.supported_features();
        if features.rate {
            let rate = self.scaled_rate(utterance.rate);
            self.tts
                .set_rate(rate)
                .map_err(|e| NarratorError::Speech(format!("Failed to set rate: {}", e)))?;
        }
        if features.pitch {
            let pitch = self.scaled_pitch(utterance.pitch);
            self.tts
                .set_pitch(pitch)
                .map_err(|e| NarratorError::Speech(format!("Failed to set pitch: {}", e)))?;
        }
        if let Err(e) = self.apply_voice(utterance.voice.as_ref()) {
            warn!("Keeping current voice: {}", e);
        }
        if let Some(voice) = &utterance.voice {
            if !voice.language.is_empty() && !voice.language.starts_with(&utterance.lang) {
                debug!(
                    "Voice {} speaks {}, utterance asked for {}",
                    voice.name, voice.language, utterance.lang
                );
            }
        }

        debug!("Speaking utterance {} ({} chars)", generation, utterance.text.len());

        // Callbacks block on the table until the new id is registered
        let mut map = self
            .pending
            .lock()
            .map_err(|_| NarratorError::Speech("Utterance table poisoned".to_string()))?;
        let id = self.tts.speak(&utterance.text, true).map_err(|e| {
            error!("Failed to speak: {}", e);
            NarratorError::Narration(format!("Speak failed: {}", e))
        })?;
        self.speaking.store(true, Ordering::SeqCst);

        match id {
            Some(id) => {
                map.insert(id, (generation, events.clone()));
            }
            None => debug!("Platform returned no utterance id for {}", generation),
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        // The tts crate has no pause primitive on any platform
        Err(NarratorError::BackendUnavailable(
            "pause not supported by native TTS".to_string(),
        ))
    }

    fn resume(&mut self) -> Result<()> {
        Err(NarratorError::BackendUnavailable(
            "resume not supported by native TTS".to_string(),
        ))
    }

    fn cancel_all(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.speaking.store(false, Ordering::SeqCst);
        if let Ok(mut map) = self.pending.lock() {
            map.clear();
        }
        if !self.tts.supported_features().stop {
            return Ok(());
        }
        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            NarratorError::Speech(format!("Cancel failed: {}", e))
        })?;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        if self.tts.supported_features().is_speaking {
            self.tts.is_speaking().unwrap_or(false)
        } else {
            self.speaking.load(Ordering::SeqCst)
        }
    }

    fn is_paused(&self) -> bool {
        false
    }

    fn reports_lifecycle(&self) -> bool {
        self.tts.supported_features().utterance_callbacks
    }
}
