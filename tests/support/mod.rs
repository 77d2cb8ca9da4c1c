//! Recording fakes for the speech engine and the clip player
//!
//! Each fake shares its log with the test through `Rc<RefCell<_>>`, so the
//! test can inspect calls and inject lifecycle events after handing the
//! fake to a controller.

#![allow(dead_code)]

use narrator::audio::ClipPlayer;
use narrator::playback::{EventSender, Generation, LifecycleEvent};
use narrator::speech::{SpeechEngine, Utterance, VoiceInfo};
use narrator::source::{Language, NarrationSource};
use narrator::{NarratorError, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

pub fn english() -> NarrationSource {
    NarrationSource::new(
        Language::english(),
        "Welcome to the application",
        Some(PathBuf::from("bot_voice_en.mp3")),
    )
}

pub fn hindi() -> NarrationSource {
    NarrationSource::new(
        Language::hindi(),
        "स्वागत है",
        Some(PathBuf::from("bot_voice_hi.mp3")),
    )
}

#[derive(Default)]
pub struct EngineLog {
    pub voices: Vec<VoiceInfo>,
    pub fail_voices: bool,
    pub fail_speak: bool,
    pub spoken: Vec<(Utterance, Generation)>,
    pub pauses: usize,
    pub resumes: usize,
    pub cancels: usize,
    pub speaking: bool,
    pub paused: bool,
    /// Engine never reports start or end; only `speaking` tells
    pub no_callbacks: bool,
    /// Every primitive call, in order
    pub ops: Vec<&'static str>,
    sender: Option<EventSender>,
}

impl EngineLog {
    /// Fire an event as the engine would, for any generation
    pub fn emit(&mut self, generation: Generation, event: LifecycleEvent) {
        if event != LifecycleEvent::Started {
            self.speaking = false;
            self.paused = false;
        }
        if let Some(sender) = &self.sender {
            sender.emit(generation, event);
        }
    }

    pub fn last_generation(&self) -> Option<Generation> {
        self.spoken.last().map(|(_, g)| *g)
    }
}

pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
    pub fn new() -> (Self, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl SpeechEngine for FakeEngine {
    fn voices(&mut self) -> Result<Vec<VoiceInfo>> {
        let log = self.log.borrow();
        if log.fail_voices {
            return Err(NarratorError::Speech("voices not loaded".to_string()));
        }
        Ok(log.voices.clone())
    }

    fn speak(
        &mut self,
        utterance: &Utterance,
        generation: Generation,
        events: &EventSender,
    ) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("speak");
        if log.fail_speak {
            return Err(NarratorError::Narration("engine refused".to_string()));
        }
        log.spoken.push((utterance.clone(), generation));
        log.sender = Some(events.clone());
        log.speaking = true;
        log.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("pause");
        log.pauses += 1;
        log.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("resume");
        log.resumes += 1;
        log.paused = false;
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("cancel");
        log.cancels += 1;
        log.speaking = false;
        log.paused = false;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.log.borrow().speaking
    }

    fn is_paused(&self) -> bool {
        self.log.borrow().paused
    }

    fn reports_lifecycle(&self) -> bool {
        !self.log.borrow().no_callbacks
    }
}

#[derive(Default)]
pub struct PlayerLog {
    pub fail_load: bool,
    pub loads: Vec<(PathBuf, Generation)>,
    pub loaded: bool,
    pub playing: bool,
    pub position: Duration,
    pub seeks: usize,
    pub unloads: usize,
    /// Every primitive call, in order
    pub ops: Vec<&'static str>,
    sender: Option<EventSender>,
}

impl PlayerLog {
    /// Advance the clip as if it had been playing for `by`
    pub fn advance(&mut self, by: Duration) {
        if self.playing {
            self.position += by;
        }
    }

    /// Fire the ended callback for `generation`
    pub fn emit_ended(&mut self, generation: Generation) {
        self.playing = false;
        if let Some(sender) = &self.sender {
            sender.emit(generation, LifecycleEvent::Ended);
        }
    }

    pub fn last_generation(&self) -> Option<Generation> {
        self.loads.last().map(|(_, g)| *g)
    }
}

pub struct FakePlayer {
    log: Rc<RefCell<PlayerLog>>,
}

impl FakePlayer {
    pub fn new() -> (Self, Rc<RefCell<PlayerLog>>) {
        let log = Rc::new(RefCell::new(PlayerLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl ClipPlayer for FakePlayer {
    fn load(&mut self, clip: &Path, generation: Generation, events: &EventSender) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("load");
        if log.fail_load {
            return Err(NarratorError::BackendUnavailable(format!(
                "cannot open {:?}",
                clip
            )));
        }
        log.loads.push((clip.to_path_buf(), generation));
        log.sender = Some(events.clone());
        log.loaded = true;
        log.playing = false;
        log.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("play");
        if !log.loaded {
            return Err(NarratorError::Narration("nothing loaded".to_string()));
        }
        log.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("pause");
        log.playing = false;
        Ok(())
    }

    fn seek_to_start(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("seek");
        log.seeks += 1;
        log.position = Duration::ZERO;
        Ok(())
    }

    fn unload(&mut self) {
        let mut log = self.log.borrow_mut();
        log.ops.push("unload");
        log.unloads += 1;
        log.loaded = false;
        log.playing = false;
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }
}
