//! Playback control shared by every narration backend
//!
//! Both backends drive the same three-state machine. Backend adapters turn
//! native callbacks into tagged lifecycle events; controllers feed those
//! events and user calls into a `Transport`, which owns the state and the
//! live handle.

pub mod controller;
pub mod events;
pub mod state;
pub mod transport;

pub use controller::{PlaybackController, StateSnapshot};
pub use events::{EventQueue, EventSender, Generation, LifecycleEvent, TaggedEvent};
pub use state::{play_pause_glyph, PlaybackState, NEXT_LABEL, PAUSE_GLYPH, PLAY_GLYPH, STOP_GLYPH};
pub use transport::{StateObserver, Transport};
