//! Playback controller for recorded clips
//!
//! Play and pause map straight onto the player. Stop also rewinds, so the
//! next play always starts from the beginning, while pause never moves the
//! position. A clip that plays through returns the controller to `Idle`.

use super::ClipPlayer;
use crate::playback::{
    EventQueue, Generation, LifecycleEvent, PlaybackController, PlaybackState, StateObserver,
    Transport,
};
use crate::source::NarrationSource;
use crate::NarratorError;
use log::{debug, info, warn};

pub struct AudioBackendController {
    player: Box<dyn ClipPlayer>,
    source: NarrationSource,
    transport: Transport,
    events: EventQueue,
}

impl AudioBackendController {
    pub fn new(player: Box<dyn ClipPlayer>, source: NarrationSource) -> Self {
        info!(
            "Audio controller ready for language {}",
            source.language()
        );
        Self {
            player,
            source,
            transport: Transport::new(),
            events: EventQueue::new(),
        }
    }

    /// Create a handle for the current source and start it
    fn start(&mut self) {
        let Some(clip) = self.source.clip().map(|p| p.to_path_buf()) else {
            let err = NarratorError::BackendUnavailable(format!(
                "no clip for language {}",
                self.source.language()
            ));
            warn!("Cannot play: {}", err);
            return;
        };

        let generation = self.transport.mint();
        if let Err(e) = self.player.load(&clip, generation, &self.events.sender()) {
            warn!("Cannot play {:?}: {}", clip, e);
            return;
        }
        if let Err(e) = self.player.play() {
            warn!("Playback of {:?} refused: {}", clip, e);
            self.player.unload();
            return;
        }

        self.transport.attach(generation);
    }

    /// Release the player after the live handle went away
    fn release(&mut self) {
        if let Err(e) = self.player.pause() {
            debug!("Pause during stop failed: {}", e);
        }
        if let Err(e) = self.player.seek_to_start() {
            debug!("Rewind during stop failed: {}", e);
        }
        self.player.unload();
    }
}

impl PlaybackController for AudioBackendController {
    fn play(&mut self) {
        match self.transport.state() {
            PlaybackState::Idle => self.start(),
            PlaybackState::Paused => match self.player.play() {
                Ok(()) => self.transport.resume(),
                Err(e) => warn!("Resume failed: {}", e),
            },
            PlaybackState::Playing => debug!("play() while playing, ignored"),
        }
    }

    fn pause(&mut self) {
        if self.transport.state() != PlaybackState::Playing {
            debug!("pause() while {}, ignored", self.transport.state());
            return;
        }
        match self.player.pause() {
            Ok(()) => self.transport.pause(),
            Err(e) => warn!("Pause failed: {}", e),
        }
    }

    fn stop(&mut self) {
        self.transport.finish();
        self.release();
    }

    fn set_source(&mut self, source: NarrationSource) {
        self.stop();
        info!(
            "Audio source {} -> {}",
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
            match self.transport.apply(tagged) {
                Some(LifecycleEvent::Ended) | Some(LifecycleEvent::Errored) => {
                    debug!("Clip {} finished", tagged.generation);
                    self.player.unload();
                    applied += 1;
                }
                Some(LifecycleEvent::Started) => applied += 1,
                None => {}
            }
        }
        applied
    }

    fn subscribe(&mut self, observer: StateObserver) {
        self.transport.subscribe(observer);
    }

    fn backend_name(&self) -> &'static str {
        "audio"
    }
}

impl Drop for AudioBackendController {
    fn drop(&mut self) {
        self.player.unload();
    }
}
