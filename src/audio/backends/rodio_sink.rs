//! Clip playback on the default output device using rodio
//!
//! One sink lives for the lifetime of the player. Each handle appends a
//! decoder for the clip followed by an empty callback source; rodio runs
//! the callback when the decoder is exhausted, which is our "ended" event.

use crate::audio::ClipPlayer;
use crate::playback::{EventSender, Generation, LifecycleEvent};
use crate::{NarratorError, Result};
use log::{debug, warn};
use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub struct SinkPlayer {
    /// Keeps the device open; dropping it silences the sink
    _stream: OutputStream,
    sink: Sink,
}

impl SinkPlayer {
    pub fn new() -> Result<Self> {
        debug!("Creating rodio output stream");

        let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
            NarratorError::BackendUnavailable(format!("No audio output device: {}", e))
        })?;
        stream.log_on_drop(false);

        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl ClipPlayer for SinkPlayer {
    fn load(&mut self, clip: &Path, generation: Generation, events: &EventSender) -> Result<()> {
        debug!("Loading clip {:?} as handle {}", clip, generation);

        let file = File::open(clip).map_err(|e| {
            NarratorError::BackendUnavailable(format!("Cannot open clip {:?}: {}", clip, e))
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| {
            NarratorError::Narration(format!("Cannot decode clip {:?}: {}", clip, e))
        })?;

        self.sink.clear();
        self.sink.pause();
        self.sink.append(decoder);

        let events = events.clone();
        self.sink.append(EmptyCallback::new(Box::new(move || {
            events.emit(generation, LifecycleEvent::Ended);
        })));

        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.sink.empty() {
            return Err(NarratorError::Narration("No clip loaded".to_string()));
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn seek_to_start(&mut self) -> Result<()> {
        if self.sink.empty() {
            return Ok(());
        }
        self.sink.try_seek(Duration::ZERO).map_err(|e| {
            warn!("Seek to start failed: {}", e);
            NarratorError::Narration(format!("Seek failed: {}", e))
        })
    }

    fn unload(&mut self) {
        self.sink.clear();
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_player() {
        // Fails without an output device, which is expected in CI
        match SinkPlayer::new() {
            Ok(_) => println!("✓ rodio output initialized"),
            Err(e) => println!("⚠ rodio output unavailable (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_missing_clip_is_backend_unavailable() {
        if let Ok(mut player) = SinkPlayer::new() {
            let queue = crate::playback::EventQueue::new();
            let result = player.load(
                Path::new("/nonexistent/clip.mp3"),
                Generation::first(),
                &queue.sender(),
            );
            assert!(matches!(result, Err(NarratorError::BackendUnavailable(_))));
            assert!(player.play().is_err());
        }
    }
}
