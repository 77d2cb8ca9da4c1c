//! Playback controller for synthesized speech
//!
//! One utterance is built per play from `Idle`. Playing while paused
//! resumes that same utterance; a new one is only synthesized after the
//! previous one ended, failed, or was stopped. Stop always cancels the
//! engine queue, whatever the state, so nothing keeps talking after a
//! source change or teardown.

use super::engine::{SpeechEngine, Utterance, VoiceInfo};
use super::voice::resolve_voice;
use crate::config::{Config, DEFAULT_PITCH, DEFAULT_RATE, DEFAULT_SPEECH_LANG};
use crate::playback::{
    EventQueue, Generation, LifecycleEvent, PlaybackController, PlaybackState, StateObserver,
    Transport,
};
use crate::source::NarrationSource;
use log::{debug, info, trace, warn};

/// Parameters applied to every utterance
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub lang: String,
    pub preferred_voices: Vec<String>,
}

impl SpeechSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rate: config.speech_rate(),
            pitch: config.speech_pitch(),
            lang: config.speech_lang(),
            preferred_voices: config.preferred_voices(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            pitch: DEFAULT_PITCH,
            lang: DEFAULT_SPEECH_LANG.to_string(),
            preferred_voices: vec!["Google US English".to_string(), "Zira".to_string()],
        }
    }
}

pub struct SpeechBackendController {
    engine: Box<dyn SpeechEngine>,
    source: NarrationSource,
    settings: SpeechSettings,
    transport: Transport,
    events: EventQueue,

    /// Last voice list read from the engine
    voices: Vec<VoiceInfo>,
}

impl SpeechBackendController {
    pub fn new(
        engine: Box<dyn SpeechEngine>,
        source: NarrationSource,
        settings: SpeechSettings,
    ) -> Self {
        let mut controller = Self {
            engine,
            source,
            settings,
            transport: Transport::new(),
            events: EventQueue::new(),
            voices: Vec::new(),
        };
        // Voices often load after the engine comes up; an empty list is fine here
        controller.voices_changed();
        info!(
            "Speech controller ready ({} voices known)",
            controller.voices.len()
        );
        controller
    }

    /// Re-read the engine's voice list
    ///
    /// Call when the engine signals that its voices changed.
    pub fn voices_changed(&mut self) {
        match self.engine.voices() {
            Ok(voices) => {
                debug!("Engine reports {} voices", voices.len());
                self.voices = voices;
            }
            Err(e) => {
                debug!("Voice list unavailable: {}", e);
                self.voices.clear();
            }
        }
    }

    fn engine_busy(&self) -> bool {
        self.engine.is_speaking() && !self.engine.is_paused()
    }

    /// Build the utterance for the current source
    ///
    /// Voices are re-read every time; engines add voices while running.
    fn build_utterance(&mut self) -> Utterance {
        self.voices_changed();
        let selection = resolve_voice(&self.voices, &self.settings.preferred_voices);
        Utterance {
            text: self.source.message().to_string(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            lang: self.settings.lang.clone(),
            voice: selection.into_voice(),
        }
    }

    fn start(&mut self) {
        if self.engine_busy() {
            debug!("Engine already speaking, play() ignored");
            return;
        }
        if self.source.message().trim().is_empty() {
            warn!(
                "No message for language {}, nothing to speak",
                self.source.language()
            );
            return;
        }

        let utterance = self.build_utterance();
        let generation = self.transport.mint();
        match self
            .engine
            .speak(&utterance, generation, &self.events.sender())
        {
            Ok(()) => {
                debug!(
                    "Utterance {} queued with voice {:?}",
                    generation,
                    utterance.voice.as_ref().map(|v| v.name.as_str())
                );
                self.transport.attach(generation);
            }
            Err(e) => warn!("Speech could not start: {}", e),
        }
    }
}

impl PlaybackController for SpeechBackendController {
    fn play(&mut self) {
        match self.transport.state() {
            PlaybackState::Idle => self.start(),
            PlaybackState::Paused => match self.engine.resume() {
                Ok(()) => self.transport.resume(),
                Err(e) => warn!("Resume failed: {}", e),
            },
            PlaybackState::Playing => debug!("play() while playing, ignored"),
        }
    }

    fn pause(&mut self) {
        if self.transport.state() != PlaybackState::Playing || !self.engine_busy() {
            debug!(
                "pause() ignored (state {}, engine busy {})",
                self.transport.state(),
                self.engine_busy()
            );
            return;
        }
        match self.engine.pause() {
            Ok(()) => self.transport.pause(),
            Err(e) => warn!("Pause failed: {}", e),
        }
    }

    fn stop(&mut self) {
        self.transport.finish();
        if let Err(e) = self.engine.cancel_all() {
            warn!("Cancel failed: {}", e);
        }
    }

    fn set_source(&mut self, source: NarrationSource) {
        self.stop();
        info!(
            "Speech source {} -> {}",
            self.source.language(),
            source.language()
        );
        self.source = source;
    }

    fn source(&self) -> &NarrationSource {
        &self.source
    }

    fn state(&self) -> PlaybackState {
        self.transport.state()
    }

    fn active_handle(&self) -> Option<Generation> {
        self.transport.live_handle()
    }

    fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        for tagged in self.events.drain() {
            // A start queued before pause() must not undo it
            if tagged.event == LifecycleEvent::Started
                && self.transport.state() == PlaybackState::Paused
                && self.engine.is_paused()
            {
                trace!("Late start for {} while paused, ignored", tagged.generation);
                continue;
            }
            match self.transport.apply(tagged) {
                Some(LifecycleEvent::Errored) => {
                    warn!("Utterance {} failed, back to idle", tagged.generation);
                    applied += 1;
                }
                Some(event) => {
                    trace!("Utterance {}: {:?}", tagged.generation, event);
                    applied += 1;
                }
                None => {}
            }
        }

        // Without callbacks the only sign of a natural end is the engine going quiet
        if !self.engine.reports_lifecycle()
            && self.transport.state() == PlaybackState::Playing
            && !self.engine.is_speaking()
        {
            if let Some(generation) = self.transport.finish() {
                debug!("Engine went quiet, utterance {} ended", generation);
                applied += 1;
            }
        }
        applied
    }

    fn subscribe(&mut self, observer: StateObserver) {
        self.transport.subscribe(observer);
    }

    fn backend_name(&self) -> &'static str {
        "speech"
    }
}

impl Drop for SpeechBackendController {
    fn drop(&mut self) {
        if let Err(e) = self.engine.cancel_all() {
            debug!("Cancel on drop failed: {}", e);
        }
    }
}
