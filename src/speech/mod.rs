//! Speech synthesis narration

pub mod backends;
pub mod controller;
pub mod engine;
pub mod voice;

pub use controller::{SpeechBackendController, SpeechSettings};
pub use engine::{create_engine, SpeechEngine, Utterance, VoiceGender, VoiceInfo};
pub use voice::{resolve_voice, VoiceSelection};
