//! Configuration management

use crate::{NarratorError, Result};
use ini::Ini;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default speaking rate, relative to the engine's normal rate
pub const DEFAULT_RATE: f32 = 0.95;

/// Default pitch, relative to the engine's normal pitch
pub const DEFAULT_PITCH: f32 = 1.0;

/// Language tag handed to the synthesis engine
pub const DEFAULT_SPEECH_LANG: &str = "en-US";

/// Voice names tried, in order, before falling back to gender and position
pub const DEFAULT_PREFERRED_VOICES: &str = "Google US English,Zira";

/// Route the "Next" action leads to
pub const DEFAULT_NEXT_SCREEN: &str = "/features";

/// Narrator configuration
///
/// Holds the backend choice, the starting language, synthesis parameters
/// and the clip locator for each language.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.narrator.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, writing defaults if missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| NarratorError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| NarratorError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Build a configuration from defaults without touching the filesystem
    pub fn in_memory() -> Self {
        Self {
            ini: Self::default_config(),
            path: PathBuf::new(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| NarratorError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.narrator.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".narrator.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("narration"))
            .set("backend", "audio")
            .set("language", "hi")
            .set("next_screen", DEFAULT_NEXT_SCREEN);

        ini.with_section(Some("speech"))
            .set("rate", DEFAULT_RATE.to_string())
            .set("pitch", DEFAULT_PITCH.to_string())
            .set("lang", DEFAULT_SPEECH_LANG)
            .set("preferred_voices", DEFAULT_PREFERRED_VOICES);

        ini.with_section(Some("audio"))
            .set("en", "bot_voice_en.mp3")
            .set("hi", "bot_voice_hi.mp3");

        ini.with_section(Some("messages"));

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// All key/value pairs of a section, sorted by key
    fn section_entries(&self, section: &str) -> BTreeMap<String, String> {
        self.ini
            .section(Some(section))
            .map(|props| {
                props
                    .iter()
                    .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Which backend narrates: "audio" or "speech"
    pub fn backend(&self) -> String {
        self.get_string("narration", "backend", "audio")
    }

    /// Language key selected at startup
    pub fn language(&self) -> String {
        self.get_string("narration", "language", "hi")
    }

    /// Route fired by the "Next" action
    pub fn next_screen(&self) -> String {
        self.get_string("narration", "next_screen", DEFAULT_NEXT_SCREEN)
    }

    /// Speaking rate as a multiple of the engine's normal rate
    pub fn speech_rate(&self) -> f32 {
        let rate = self.get_float("speech", "rate", DEFAULT_RATE);
        if rate > 0.0 {
            rate
        } else {
            DEFAULT_RATE
        }
    }

    /// Pitch as a multiple of the engine's normal pitch
    pub fn speech_pitch(&self) -> f32 {
        let pitch = self.get_float("speech", "pitch", DEFAULT_PITCH);
        if pitch > 0.0 {
            pitch
        } else {
            DEFAULT_PITCH
        }
    }

    /// Language tag for synthesized utterances
    pub fn speech_lang(&self) -> String {
        self.get_string("speech", "lang", DEFAULT_SPEECH_LANG)
    }

    /// Ordered voice names to try first
    pub fn preferred_voices(&self) -> Vec<String> {
        self.get_string("speech", "preferred_voices", DEFAULT_PREFERRED_VOICES)
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }

    /// Clip locator per language key, from the `[audio]` section
    pub fn clip_locators(&self) -> BTreeMap<String, String> {
        self.section_entries("audio")
    }

    /// Message overrides per language key, from the `[messages]` section
    pub fn message_overrides(&self) -> BTreeMap<String, String> {
        self.section_entries("messages")
    }
}
