//! Narration sources
//!
//! A narration source ties a language key to the material each backend
//! narrates: the message text for speech synthesis and the recorded clip
//! for audio playback. The catalog holds one source per language.

use crate::config::Config;
use crate::{NarratorError, Result};
use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Built-in introduction text, keyed by language
pub static MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "en",
        "Here is the brand new solution for Financial Inclusion! This application empowers \
         farmers and small businesses by assessing crop choices, predicting yields, and helping \
         with loan approvals. We also help to get insurance, connect with the PDS system under \
         MSP contracts for better supply chain management.",
    );
    m.insert(
        "hi",
        "यह वित्तीय समावेशन के लिए एक नया समाधान है! यह एप्लिकेशन किसानों और छोटे व्यवसायों को \
         फसल चयन का मूल्यांकन करने, उपज की भविष्यवाणी करने, और ऋण अनुमोदन में सहायता करता है। \
         हम बीमा प्राप्त करने, एमएसपी अनुबंधों के तहत सार्वजनिक वितरण प्रणाली से जुड़ने में भी मदद करते हैं।",
    );
    m
});

/// Language key such as `en` or `hi`
///
/// Keys are normalized to lowercase. The set is open: any key that has a
/// message or a clip configured is a valid language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(key: &str) -> Result<Self> {
        let key = key.trim().to_lowercase();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(NarratorError::UnknownLanguage(key));
        }
        Ok(Self(key))
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    pub fn hindi() -> Self {
        Self("hi".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable name for the language selector
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "en" => "English",
            "hi" => "Hindi",
            other => other,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What gets narrated for one language
///
/// Immutable once built. The speech backend reads `message`, the audio
/// backend reads `clip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationSource {
    language: Language,
    message: String,
    clip: Option<PathBuf>,
}

impl NarrationSource {
    pub fn new(language: Language, message: impl Into<String>, clip: Option<PathBuf>) -> Self {
        Self {
            language,
            message: message.into(),
            clip,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Text shown on screen and spoken by the synthesis backend
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Recorded clip played by the audio backend, if one exists
    pub fn clip(&self) -> Option<&Path> {
        self.clip.as_deref()
    }
}

/// Every narration source the widget can switch between
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: BTreeMap<Language, NarrationSource>,
}

impl Catalog {
    /// Built-in messages and default clip names
    pub fn builtin() -> Self {
        let mut sources = BTreeMap::new();
        for (key, message) in MESSAGES.iter() {
            let language = Language(key.to_string());
            let clip = PathBuf::from(format!("bot_voice_{}.mp3", key));
            sources.insert(
                language.clone(),
                NarrationSource::new(language, *message, Some(clip)),
            );
        }
        Self { sources }
    }

    /// Built-in catalog extended and overridden by configuration
    ///
    /// `[audio]` entries replace clip locators, `[messages]` entries replace
    /// text. A key that appears only in config adds a new language.
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::builtin();

        let clips = config.clip_locators();
        let messages = config.message_overrides();

        let keys: Vec<&String> = clips.keys().chain(messages.keys()).collect();
        for key in keys {
            let language = match Language::new(key) {
                Ok(language) => language,
                Err(e) => {
                    debug!("Skipping config entry: {}", e);
                    continue;
                }
            };

            let current = catalog.sources.get(&language);
            let message = messages
                .get(key)
                .cloned()
                .or_else(|| current.map(|s| s.message.clone()))
                .unwrap_or_default();
            let clip = clips
                .get(key)
                .map(PathBuf::from)
                .or_else(|| current.and_then(|s| s.clip.clone()));

            catalog
                .sources
                .insert(language.clone(), NarrationSource::new(language, message, clip));
        }

        debug!("Catalog has {} languages", catalog.sources.len());
        catalog
    }

    /// Look up the source for a language key
    pub fn source(&self, key: &str) -> Result<NarrationSource> {
        let language = Language::new(key)?;
        self.sources
            .get(&language)
            .cloned()
            .ok_or(NarratorError::UnknownLanguage(language.0))
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.sources.keys()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalized() {
        assert_eq!(Language::new(" EN ").unwrap(), Language::english());
        assert!(Language::new("").is_err());
        assert!(Language::new("e n").is_err());
        assert_eq!(Language::hindi().display_name(), "Hindi");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 2);

        let en = catalog.source("en").unwrap();
        assert!(en.message().starts_with("Here is the brand new solution"));
        assert_eq!(en.clip(), Some(Path::new("bot_voice_en.mp3")));

        let hi = catalog.source("hi").unwrap();
        assert_eq!(hi.language(), &Language::hindi());
        assert_eq!(hi.clip(), Some(Path::new("bot_voice_hi.mp3")));
    }

    #[test]
    fn test_unknown_language() {
        let catalog = Catalog::builtin();
        match catalog.source("fr") {
            Err(NarratorError::UnknownLanguage(key)) => assert_eq!(key, "fr"),
            other => panic!("expected UnknownLanguage, got {:?}", other),
        }
    }

    #[test]
    fn test_config_extends_catalog() {
        let mut config = Config::in_memory();
        config.set("audio", "en", "/srv/clips/intro_en.ogg");
        config.set("audio", "mr", "/srv/clips/intro_mr.ogg");
        config.set("messages", "mr", "नमस्कार");

        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.len(), 3);

        let en = catalog.source("en").unwrap();
        assert_eq!(en.clip(), Some(Path::new("/srv/clips/intro_en.ogg")));
        assert!(en.message().starts_with("Here is"));

        let mr = catalog.source("mr").unwrap();
        assert_eq!(mr.message(), "नमस्कार");
        assert_eq!(mr.clip(), Some(Path::new("/srv/clips/intro_mr.ogg")));
    }
}
