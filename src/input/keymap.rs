//! Default command bindings for the narrator front end

use std::collections::HashMap;

/// Action requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    // Playback
    TogglePlayback,
    Play,
    Pause,
    Stop,

    // Source
    SetLanguage(String),

    // Navigation
    Next,

    // Front end
    Help,
    Quit,
}

/// Create the default keymap (single-word commands)
pub fn create_default_keymap() -> HashMap<&'static str, UiAction> {
    let mut map = HashMap::new();

    // Play/pause button
    map.insert("", UiAction::TogglePlayback);
    map.insert("t", UiAction::TogglePlayback);
    map.insert("toggle", UiAction::TogglePlayback);
    map.insert("p", UiAction::TogglePlayback);
    map.insert("play", UiAction::Play);
    map.insert("pause", UiAction::Pause);

    // Stop button
    map.insert("s", UiAction::Stop);
    map.insert("stop", UiAction::Stop);

    // Next button
    map.insert("n", UiAction::Next);
    map.insert("next", UiAction::Next);

    map.insert("h", UiAction::Help);
    map.insert("?", UiAction::Help);
    map.insert("help", UiAction::Help);
    map.insert("q", UiAction::Quit);
    map.insert("quit", UiAction::Quit);

    map
}

/// Parse one input line
///
/// `l <key>` and `lang <key>` select a language; everything else is looked
/// up in the keymap. An empty line toggles playback.
pub fn parse_command(keymap: &HashMap<&'static str, UiAction>, line: &str) -> Option<UiAction> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("").to_lowercase();

    if head == "l" || head == "lang" {
        return words.next().map(|key| UiAction::SetLanguage(key.to_lowercase()));
    }

    if words.next().is_some() {
        return None;
    }
    keymap.get(head.as_str()).cloned()
}
