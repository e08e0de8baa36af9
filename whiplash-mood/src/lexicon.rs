//! Emotion lexicon and negation tables.
//!
//! Trigger phrases are compiled-in constants, inverted once at first use
//! into the lookup structures the classifier consumes. Nothing here is
//! mutated after construction, so the tables are shared across threads
//! without locking.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Mood categories recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Excited,
    Love,
    Frustrated,
    Fear,
    Neutral,
}

impl Mood {
    /// Display label, also used as the playlist search query.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Excited => "Excited",
            Mood::Love => "Love",
            Mood::Frustrated => "Frustrated",
            Mood::Fear => "Fear",
            Mood::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger registration table.
///
/// Order matters: the phrase pass appends moods in table order, which feeds
/// the first-seen tie-break in ranking.
const EMOTION_TRIGGERS: &[(Mood, &[&str])] = &[
    (
        Mood::Happy,
        &["happy", "vibing", "lit", "great", "amazing", "yay", "slaying", "good"],
    ),
    (
        Mood::Sad,
        &["sad", "down", "depressed", "crying", "blue", "meh", "idk", "lost"],
    ),
    (
        Mood::Angry,
        &["angry", "mad", "annoyed", "irritated", "furious", "pissed", "raging"],
    ),
    (
        Mood::Excited,
        &["excited", "hyped", "pumped", "buzzing", "over the moon", "omg"],
    ),
    (Mood::Love, &["love", "crushing", "smitten", "obsessed", "infatuated"]),
    (
        Mood::Frustrated,
        &["frustrated", "done", "over it", "fed up", "tired"],
    ),
    (
        Mood::Fear,
        &["scared", "nervous", "anxious", "worried", "panicking", "stressed"],
    ),
];

/// Negation markers checked in the window before a single-word trigger.
/// "nt" is what remains of the "n't" contraction after punctuation
/// stripping splits it off ("is n't" tokenizes to ["is", "nt"]).
const NEGATIONS: &[&str] = &["not", "no", "never", "none", "nt"];

static LEXICON: Lazy<EmotionLexicon> = Lazy::new(EmotionLexicon::build);

/// Lookup structures derived from [`EMOTION_TRIGGERS`].
///
/// Single-word triggers invert into a token -> mood map; multi-word
/// phrases stay in an ordered list for the substring pass. A phrase
/// registered under two moods keeps its first position but takes the
/// last-registered mood, so the derived tables are deterministic.
pub struct EmotionLexicon {
    keywords: HashMap<&'static str, Mood>,
    phrases: Vec<(&'static str, Mood)>,
    negations: HashSet<&'static str>,
}

impl EmotionLexicon {
    fn build() -> Self {
        let mut keywords = HashMap::new();
        let mut phrases: Vec<(&'static str, Mood)> = Vec::new();

        for (mood, triggers) in EMOTION_TRIGGERS {
            for &trigger in *triggers {
                if trigger.contains(' ') {
                    match phrases.iter_mut().find(|entry| entry.0 == trigger) {
                        Some(entry) => entry.1 = *mood,
                        None => phrases.push((trigger, *mood)),
                    }
                } else {
                    keywords.insert(trigger, *mood);
                }
            }
        }

        Self {
            keywords,
            phrases,
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Process-wide lexicon, built on first access.
    pub fn global() -> &'static EmotionLexicon {
        &LEXICON
    }

    /// Mood mapped to a single-word trigger, if any.
    pub fn keyword_mood(&self, token: &str) -> Option<Mood> {
        self.keywords.get(token).copied()
    }

    /// Multi-word phrases in registration order.
    pub fn phrases(&self) -> &[(&'static str, Mood)] {
        &self.phrases
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_triggers_invert_to_keyword_map() {
        let lexicon = EmotionLexicon::global();
        assert_eq!(lexicon.keyword_mood("happy"), Some(Mood::Happy));
        assert_eq!(lexicon.keyword_mood("pissed"), Some(Mood::Angry));
        assert_eq!(lexicon.keyword_mood("stressed"), Some(Mood::Fear));
        assert_eq!(lexicon.keyword_mood("playlist"), None);
    }

    #[test]
    fn multi_word_triggers_stay_in_phrase_list() {
        let lexicon = EmotionLexicon::global();
        // Phrases never land in the keyword map.
        assert_eq!(lexicon.keyword_mood("over the moon"), None);

        let phrases: Vec<&str> = lexicon.phrases().iter().map(|(p, _)| *p).collect();
        assert_eq!(phrases, vec!["over the moon", "over it", "fed up"]);
    }

    #[test]
    fn phrase_list_preserves_registration_order() {
        let lexicon = EmotionLexicon::global();
        assert_eq!(lexicon.phrases()[0], ("over the moon", Mood::Excited));
        assert_eq!(lexicon.phrases()[1], ("over it", Mood::Frustrated));
    }

    #[test]
    fn negation_markers() {
        let lexicon = EmotionLexicon::global();
        for marker in ["not", "no", "never", "none", "nt"] {
            assert!(lexicon.is_negation(marker), "{marker} should negate");
        }
        assert!(!lexicon.is_negation("very"));
    }

    #[test]
    fn mood_labels() {
        assert_eq!(Mood::Happy.as_str(), "Happy");
        assert_eq!(Mood::Neutral.to_string(), "Neutral");
    }
}
