//! Front-end input bindings
//!
//! The terminal front end reads one command per line and maps it to a
//! `UiAction` through the keymap.

pub mod keymap;

pub use keymap::{create_default_keymap, parse_command, UiAction};
