//! The contract every narration backend exposes to the presentation layer

use super::events::Generation;
use super::state::{play_pause_glyph, PlaybackState};
use super::transport::StateObserver;
use crate::source::NarrationSource;
use serde::Serialize;

/// Playback control shared by the audio and speech backends
///
/// Every call is valid in every state. A call with nothing to do is a
/// silent no-op, never an error, and backend failures resolve to `Idle`.
pub trait PlaybackController {
    /// Start from `Idle` with a new handle, or resume a paused one
    fn play(&mut self);

    /// Suspend output while `Playing`, keeping the handle
    fn pause(&mut self);

    /// Halt and discard any handle and return to `Idle`
    fn stop(&mut self);

    /// Adopt a new narration source, stopping first if anything is live
    fn set_source(&mut self, source: NarrationSource);

    /// Source currently selected
    fn source(&self) -> &NarrationSource;

    fn state(&self) -> PlaybackState;

    /// Generation of the live handle, if any
    fn active_handle(&self) -> Option<Generation>;

    /// Apply lifecycle events the backend delivered since the last call
    ///
    /// Returns how many events were applied; stale ones are not counted.
    fn pump_events(&mut self) -> usize;

    /// Register a callback fired on every state change
    fn subscribe(&mut self, observer: StateObserver);

    /// Short backend name for display and logs
    fn backend_name(&self) -> &'static str;

    /// Tear down: cancel everything and return to `Idle`
    fn dispose(&mut self) {
        self.stop();
    }

    /// Single play/pause button: pause while playing, otherwise play
    fn toggle(&mut self) {
        if self.state() == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn snapshot(&self) -> StateSnapshot {
        let state = self.state();
        StateSnapshot {
            state,
            glyph: play_pause_glyph(state),
            language: self.source().language().as_str().to_string(),
            backend: self.backend_name(),
        }
    }
}

/// What the presentation layer needs to re-render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub state: PlaybackState,
    pub glyph: &'static str,
    pub language: String,
    pub backend: &'static str,
}
