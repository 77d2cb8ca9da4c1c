//! Narrator - narrated introduction widget
//!
//! Plays an introductory message either from a recorded clip chosen by
//! language or through on-device speech synthesis, behind one
//! play/pause/stop controller.

pub mod audio;
pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod navigation;
pub mod playback;
pub mod source;
pub mod speech;

pub use error::{NarratorError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "narrator";
