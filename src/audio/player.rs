//! Clip player abstraction
//!
//! The primitives the audio controller needs from an output device.
//! Implementations never change playback state themselves; they report
//! the natural end of a clip through the `EventSender` they were given.

use crate::playback::{EventSender, Generation};
use crate::Result;
use log::info;
use std::path::Path;
use std::time::Duration;

/// Recorded audio output
pub trait ClipPlayer {
    /// Queue a clip from its start, paused, as handle `generation`
    ///
    /// When the clip plays through, the player emits `Ended` for
    /// `generation` on `events`.
    fn load(&mut self, clip: &Path, generation: Generation, events: &EventSender) -> Result<()>;

    /// Start or continue output of the loaded clip
    fn play(&mut self) -> Result<()>;

    /// Suspend output, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Move the loaded clip back to its start
    fn seek_to_start(&mut self) -> Result<()>;

    /// Drop the loaded clip, if any
    fn unload(&mut self);

    /// Position within the loaded clip
    fn position(&self) -> Duration;
}

/// Open the default output device
pub fn create_player() -> Result<Box<dyn ClipPlayer>> {
    use super::backends::rodio_sink::SinkPlayer;

    info!("Opening default audio output...");
    let player = SinkPlayer::new()?;
    info!("✓ Audio output ready");
    Ok(Box::new(player))
}
