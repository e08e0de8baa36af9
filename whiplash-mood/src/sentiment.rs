//! Sentiment-polarity fallback.
//!
//! Lexicon-based estimator used when no emotion trigger fires. Words carry
//! signed valence weights; a negation marker directly before a matched word
//! flips the weight at half strength, so "not happy" reads mildly negative
//! rather than fully unhappy. Net polarity is reported in `[-1, 1]`.

use crate::lexicon::EmotionLexicon;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Weight multiplier applied when the preceding token is a negation marker.
const NEGATION_FACTOR: f32 = -0.5;

static VALENCE: Lazy<HashMap<&'static str, f32>> = Lazy::new(build_valence);

fn build_valence() -> HashMap<&'static str, f32> {
    let mut words = HashMap::new();

    // Strong positive
    for word in [
        "excellent",
        "wonderful",
        "amazing",
        "fantastic",
        "brilliant",
        "perfect",
        "incredible",
        "superb",
        "magnificent",
    ] {
        words.insert(word, 0.9);
    }

    // Moderate positive
    for word in [
        "good",
        "great",
        "nice",
        "happy",
        "glad",
        "pleasant",
        "lovely",
        "delightful",
        "fun",
        "enjoyed",
        "enjoying",
        "exciting",
        "pleased",
        "satisfied",
    ] {
        words.insert(word, 0.6);
    }

    // Mild positive
    for word in ["okay", "fine", "decent", "alright", "calm", "hopeful", "promising"] {
        words.insert(word, 0.3);
    }

    // Strong negative
    for word in [
        "terrible",
        "awful",
        "horrible",
        "dreadful",
        "miserable",
        "devastating",
        "atrocious",
        "hate",
        "worst",
    ] {
        words.insert(word, -0.9);
    }

    // Moderate negative
    for word in [
        "bad",
        "sad",
        "upset",
        "unhappy",
        "angry",
        "annoying",
        "disappointing",
        "frustrating",
        "gloomy",
        "hurt",
        "crying",
        "unpleasant",
    ] {
        words.insert(word, -0.6);
    }

    // Mild negative
    for word in ["tired", "bored", "boring", "dull", "meh", "bleak", "lonely", "mediocre"] {
        words.insert(word, -0.3);
    }

    words
}

/// Net polarity of `text` in `[-1, 1]`.
///
/// Tokenizes on non-alphabetic characters, looks each word up in the
/// valence table, and averages the signed weights over the matched words.
/// Zero matches yield 0.0, so empty or affect-free text is neutral.
pub fn polarity(text: &str) -> f32 {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let lexicon = EmotionLexicon::global();
    let mut sum = 0.0f32;
    let mut matched = 0u32;

    for (i, token) in tokens.iter().enumerate() {
        let Some(&weight) = VALENCE.get(token.as_str()) else {
            continue;
        };
        matched += 1;
        let negated = i > 0 && lexicon.is_negation(&tokens[i - 1]);
        sum += if negated { weight * NEGATION_FACTOR } else { weight };
    }

    if matched == 0 {
        return 0.0;
    }
    (sum / matched as f32).clamp(-1.0, 1.0)
}
