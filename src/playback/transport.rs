//! The shared playback state machine
//!
//! ```text
//! Idle    --play-->             Playing
//! Playing --pause-->            Paused
//! Paused  --play-->             Playing
//! Playing --stop/ended/error--> Idle
//! Paused  --stop-->             Idle
//! Idle    --stop-->             Idle
//! ```
//!
//! The transport knows nothing about backends. Controllers call the
//! backend first and only move the transport once the backend accepted
//! the request, so the state never claims something the backend refused.

use super::events::{Generation, LifecycleEvent, TaggedEvent};
use super::state::PlaybackState;
use log::{debug, trace};

/// Callback fired whenever the state changes
pub type StateObserver = Box<dyn FnMut(PlaybackState)>;

/// Playback state plus the handle it refers to
pub struct Transport {
    state: PlaybackState,

    /// Generation of the live handle, `None` exactly when `Idle`
    live: Option<Generation>,

    /// Generation the next handle will get
    next: Generation,

    observers: Vec<StateObserver>,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            live: None,
            next: Generation::first(),
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Generation of the live handle
    pub fn live_handle(&self) -> Option<Generation> {
        self.live
    }

    /// Register a state-change observer
    pub fn subscribe(&mut self, observer: StateObserver) {
        self.observers.push(observer);
    }

    /// Reserve the generation for a new handle
    ///
    /// The reservation is consumed even if the backend then fails to create
    /// the handle, so a generation is never handed out twice.
    pub fn mint(&mut self) -> Generation {
        let generation = self.next;
        self.next = generation.next();
        generation
    }

    /// `Idle -> Playing` with a freshly created handle
    pub fn attach(&mut self, generation: Generation) {
        debug_assert!(self.live.is_none(), "attach over a live handle");
        debug!("Handle {} attached", generation);
        self.live = Some(generation);
        self.set_state(PlaybackState::Playing);
    }

    /// `Playing -> Paused`, handle retained
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// `Paused -> Playing` on the same handle
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.set_state(PlaybackState::Playing);
        }
    }

    /// Any state `-> Idle`, discarding the live handle
    ///
    /// Returns the discarded generation. The handle reference is cleared
    /// before observers run, so nothing they trigger can revive it.
    pub fn finish(&mut self) -> Option<Generation> {
        let discarded = self.live.take();
        if let Some(generation) = discarded {
            debug!("Handle {} discarded", generation);
        }
        self.set_state(PlaybackState::Idle);
        discarded
    }

    /// Whether an event belongs to the live handle
    pub fn accepts(&self, generation: Generation) -> bool {
        self.live == Some(generation)
    }

    /// Apply a lifecycle event
    ///
    /// Events for anything but the live handle are dropped. Returns the
    /// event when it was applied.
    pub fn apply(&mut self, tagged: TaggedEvent) -> Option<LifecycleEvent> {
        if !self.accepts(tagged.generation) {
            trace!(
                "Ignoring stale {:?} from handle {} (live: {:?})",
                tagged.event,
                tagged.generation,
                self.live
            );
            return None;
        }

        match tagged.event {
            LifecycleEvent::Started => self.set_state(PlaybackState::Playing),
            LifecycleEvent::Ended | LifecycleEvent::Errored => {
                self.finish();
            }
        }
        Some(tagged.event)
    }

    fn set_state(&mut self, next: PlaybackState) {
        debug_assert_eq!(next.has_handle(), self.live.is_some());
        if self.state == next {
            return;
        }
        debug!("Playback {} -> {}", self.state, next);
        self.state = next;
        for observer in self.observers.iter_mut() {
            observer(next);
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
