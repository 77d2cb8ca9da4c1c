//! Lifecycle events delivered by backends
//!
//! Backends fire their callbacks on whatever thread the platform uses.
//! Adapters translate those callbacks into `LifecycleEvent`s tagged with
//! the generation of the handle that produced them and push them into a
//! channel. The controller drains the channel on its own thread, so every
//! state change happens on one thread of control.

use log::trace;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

/// Tag identifying one narration attempt
///
/// A fresh generation is minted for every `Idle -> Playing` transition and
/// never reused, so events from a discarded handle can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub(crate) fn first() -> Self {
        Generation(1)
    }

    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Backend-neutral notification about a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Output actually began
    Started,
    /// Output reached its natural end
    Ended,
    /// The backend gave up mid-narration
    Errored,
}

/// A lifecycle event and the handle it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedEvent {
    pub generation: Generation,
    pub event: LifecycleEvent,
}

/// Sending half handed to backend adapters
///
/// Cheap to clone and safe to move into platform callbacks.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<TaggedEvent>,
}

impl EventSender {
    /// Queue an event for the controller
    ///
    /// If the controller is gone the event is dropped.
    pub fn emit(&self, generation: Generation, event: LifecycleEvent) {
        if self.tx.send(TaggedEvent { generation, event }).is_err() {
            trace!("Dropping {:?} for {}: controller gone", event, generation);
        }
    }
}

/// Channel owned by a controller
pub struct EventQueue {
    tx: Sender<TaggedEvent>,
    rx: Receiver<TaggedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A sender for a backend adapter
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every event delivered so far, without blocking
    pub fn drain(&self) -> Vec<TaggedEvent> {
        self.rx.try_iter().collect()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
