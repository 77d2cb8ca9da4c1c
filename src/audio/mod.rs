//! Recorded clip narration

pub mod backends;
pub mod controller;
pub mod player;

pub use controller::AudioBackendController;
pub use player::{create_player, ClipPlayer};
