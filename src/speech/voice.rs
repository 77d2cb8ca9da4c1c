//! Voice resolution
//!
//! Applied once per utterance. Order of preference:
//! 1. a voice whose name exactly matches a preferred name, in list order
//! 2. the first voice reported as female
//! 3. the first voice
//! 4. the engine default, when no voices are enumerable yet

use super::engine::{VoiceGender, VoiceInfo};
use log::debug;

/// Outcome of voice resolution, recording which rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelection {
    Preferred(VoiceInfo),
    Female(VoiceInfo),
    FirstAvailable(VoiceInfo),
    EngineDefault,
}

impl VoiceSelection {
    /// Voice to set on the utterance; `None` keeps the engine default
    pub fn voice(&self) -> Option<&VoiceInfo> {
        match self {
            VoiceSelection::Preferred(v)
            | VoiceSelection::Female(v)
            | VoiceSelection::FirstAvailable(v) => Some(v),
            VoiceSelection::EngineDefault => None,
        }
    }

    pub fn into_voice(self) -> Option<VoiceInfo> {
        match self {
            VoiceSelection::Preferred(v)
            | VoiceSelection::Female(v)
            | VoiceSelection::FirstAvailable(v) => Some(v),
            VoiceSelection::EngineDefault => None,
        }
    }
}

/// Pick a voice from `voices`
pub fn resolve_voice(voices: &[VoiceInfo], preferred: &[String]) -> VoiceSelection {
    let selection = preferred
        .iter()
        .find_map(|name| voices.iter().find(|v| &v.name == name))
        .map(|v| VoiceSelection::Preferred(v.clone()))
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.gender == Some(VoiceGender::Female))
                .map(|v| VoiceSelection::Female(v.clone()))
        })
        .or_else(|| voices.first().map(|v| VoiceSelection::FirstAvailable(v.clone())))
        .unwrap_or(VoiceSelection::EngineDefault);

    debug!(
        "Resolved voice from {} candidates: {:?}",
        voices.len(),
        selection
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferred() -> Vec<String> {
        vec!["Google US English".to_string(), "Zira".to_string()]
    }

    fn voices() -> Vec<VoiceInfo> {
        vec![
            VoiceInfo::new("v1", "David").with_gender(VoiceGender::Male),
            VoiceInfo::new("v2", "Samantha").with_gender(VoiceGender::Female),
            VoiceInfo::new("v3", "Zira"),
            VoiceInfo::new("v4", "Google US English"),
        ]
    }

    #[test]
    fn test_first_preference_wins() {
        let selection = resolve_voice(&voices(), &preferred());
        assert_eq!(
            selection,
            VoiceSelection::Preferred(VoiceInfo::new("v4", "Google US English"))
        );
    }

    #[test]
    fn test_second_preference() {
        let mut list = voices();
        list.pop();
        let selection = resolve_voice(&list, &preferred());
        assert_eq!(selection.voice().map(|v| v.name.as_str()), Some("Zira"));
    }

    #[test]
    fn test_name_match_is_exact() {
        let list = vec![
            VoiceInfo::new("v1", "Microsoft Zira Desktop"),
            VoiceInfo::new("v2", "Alex"),
        ];
        let selection = resolve_voice(&list, &preferred());
        assert_eq!(
            selection,
            VoiceSelection::FirstAvailable(VoiceInfo::new("v1", "Microsoft Zira Desktop"))
        );
    }

    #[test]
    fn test_female_fallback() {
        let list = voices()[..2].to_vec();
        let selection = resolve_voice(&list, &preferred());
        assert!(matches!(selection, VoiceSelection::Female(ref v) if v.name == "Samantha"));
    }

    #[test]
    fn test_first_available_fallback() {
        let list = voices()[..1].to_vec();
        let selection = resolve_voice(&list, &preferred());
        assert!(matches!(selection, VoiceSelection::FirstAvailable(ref v) if v.name == "David"));
    }

    #[test]
    fn test_empty_list_uses_engine_default() {
        let selection = resolve_voice(&[], &preferred());
        assert_eq!(selection, VoiceSelection::EngineDefault);
        assert!(selection.voice().is_none());
    }
}
