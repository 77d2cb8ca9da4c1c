//! Playback state and the glyphs that render it

use serde::Serialize;
use std::fmt;

/// Glyph on the play/pause button while not playing
pub const PLAY_GLYPH: &str = "▶";

/// Glyph on the play/pause button while playing
pub const PAUSE_GLYPH: &str = "⏸";

/// Glyph on the stop button, always available
pub const STOP_GLYPH: &str = "⏹";

/// Label of the navigation button
pub const NEXT_LABEL: &str = "Next →";

/// Narration lifecycle state
///
/// Exactly one holds at a time. `Playing` and `Paused` always come with a
/// live handle, `Idle` never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing requested yet, or stopped
    #[default]
    Idle,
    /// Producing audible output
    Playing,
    /// Suspended mid-narration, resumable
    Paused,
}

impl PlaybackState {
    /// Whether a handle must be live in this state
    pub fn has_handle(self) -> bool {
        !matches!(self, PlaybackState::Idle)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Glyph for the play/pause button in the given state
pub fn play_pause_glyph(state: PlaybackState) -> &'static str {
    if state == PlaybackState::Playing {
        PAUSE_GLYPH
    } else {
        PLAY_GLYPH
    }
}
