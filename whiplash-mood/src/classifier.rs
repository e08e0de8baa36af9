//! Rule-based mood detection.
//!
//! Hybrid classifier over free-text self-reports: multi-word phrase
//! matching, single-word trigger matching guarded by a negation window,
//! capitalization-based intensity, and a sentiment-polarity fallback when
//! no trigger fires. Pure function of the input and the compiled-in
//! tables, so concurrent calls are safe without coordination.

use crate::lexicon::{EmotionLexicon, Mood};
use crate::sentiment;
use tracing::debug;

/// Tokens scanned backwards from a matched trigger for a negation marker.
const NEGATION_WINDOW: usize = 3;

/// Uppercase fraction above which Angry/Excited matches are intensified.
const INTENSITY_THRESHOLD: f64 = 0.5;

/// Polarity above which the fallback reports Happy.
const POSITIVE_POLARITY: f32 = 0.4;

/// Polarity below which the fallback reports Sad.
const NEGATIVE_POLARITY: f32 = -0.2;

/// Suffix for emphasized Angry/Excited matches. The suffixed string is a
/// distinct aggregation key: "Angry" and "Angry (INTENSE)" never merge.
const INTENSE_SUFFIX: &str = " (INTENSE)";

/// Detect moods in `text`, ranked by detection count.
///
/// Never returns an empty sequence: when no trigger fires the sentiment
/// fallback contributes exactly one label, "Neutral" in the worst case.
/// Labels detected more than once render as `"{label} ({count})"`; ties
/// in count keep first-detected order.
pub fn detect_mood(text: &str) -> Vec<String> {
    let lexicon = EmotionLexicon::global();

    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    // Emphasis signal comes from the raw text, before case folding.
    let total_chars = text.chars().count();
    let upper_chars = text.chars().filter(|c| c.is_uppercase()).count();
    let upper_ratio = upper_chars as f64 / total_chars.max(1) as f64;

    let mut detected: Vec<String> = Vec::new();

    // Phrase pass: whole-text substring checks. Not negation-guarded and
    // never intensified; only the token pass below gets those treatments.
    for (phrase, mood) in lexicon.phrases() {
        if cleaned.contains(phrase) {
            detected.push(mood.as_str().to_string());
        }
    }

    // Token pass: single-word triggers with a negation window.
    for (i, token) in tokens.iter().enumerate() {
        let Some(mood) = lexicon.keyword_mood(token) else {
            continue;
        };
        if negated(lexicon, &tokens, i) {
            debug!(token = *token, "trigger suppressed by negation");
            continue;
        }
        let mut label = mood.as_str().to_string();
        if upper_ratio > INTENSITY_THRESHOLD && matches!(mood, Mood::Angry | Mood::Excited) {
            label.push_str(INTENSE_SUFFIX);
        }
        detected.push(label);
    }

    // Fallback: polarity estimate over the raw text.
    if detected.is_empty() {
        let polarity = sentiment::polarity(text);
        let mood = if polarity > POSITIVE_POLARITY {
            Mood::Happy
        } else if polarity < NEGATIVE_POLARITY {
            Mood::Sad
        } else {
            Mood::Neutral
        };
        debug!(polarity, mood = mood.as_str(), "no trigger fired, using sentiment fallback");
        detected.push(mood.as_str().to_string());
    }

    rank(detected)
}

/// True when a negation marker appears in the window before `index`.
fn negated(lexicon: &EmotionLexicon, tokens: &[&str], index: usize) -> bool {
    tokens[index.saturating_sub(NEGATION_WINDOW)..index]
        .iter()
        .any(|t| lexicon.is_negation(t))
}

/// Count exact label strings and order by count descending, ties by first
/// appearance (stable sort over insertion order).
fn rank(detected: Vec<String>) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in detected {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(label, n)| if n > 1 { format!("{} ({})", label, n) } else { label })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(detect_mood(""), vec!["Neutral"]);
    }

    #[test]
    fn single_trigger() {
        assert_eq!(detect_mood("I am so happy today"), vec!["Happy"]);
    }

    #[test]
    fn punctuation_is_stripped_before_matching() {
        assert_eq!(detect_mood("happy!!!"), vec!["Happy"]);
        assert_eq!(detect_mood("so... sad."), vec!["Sad"]);
    }

    #[test]
    fn negation_window_suppresses_trigger() {
        // "happy" sits one token after "not"; suppressed, and the
        // sentiment fallback reads the negated positive as Sad.
        assert_eq!(detect_mood("not happy at all"), vec!["Sad"]);
    }

    #[test]
    fn negation_window_spans_three_tokens() {
        // "never" is exactly three tokens before the trigger "vibing"
        // (chosen because the valence table does not know it, so the
        // fallback lands on Neutral instead of re-detecting Happy).
        assert_eq!(detect_mood("never been that vibing"), vec!["Neutral"]);
    }

    #[test]
    fn negation_outside_window_does_not_suppress() {
        // Four tokens between "not" and "happy": the window misses it.
        assert_eq!(detect_mood("not that it would matter happy"), vec!["Happy"]);
    }

    #[test]
    fn contraction_negation_marker() {
        // Punctuation stripping turns a detached "n't" into the token "nt",
        // which suppresses the trigger two tokens later.
        assert_eq!(detect_mood("is n't this lit"), vec!["Neutral"]);
    }

    #[test]
    fn intensity_applies_to_angry_and_excited_only() {
        let result = detect_mood("HAPPY HAPPY ANGRY");
        assert_eq!(result, vec!["Happy (2)", "Angry (INTENSE)"]);
    }

    #[test]
    fn intensity_requires_majority_uppercase() {
        // Lowercase tail drags the uppercase ratio under the threshold.
        let result = detect_mood("ANGRY but mostly just writing normally here");
        assert_eq!(result, vec!["Angry"]);
    }

    #[test]
    fn intense_label_is_a_distinct_key() {
        // Mixed-case input cannot produce both forms in one call, but the
        // aggregation key contract is visible through rank() directly.
        let ranked = rank(vec![
            "Angry".to_string(),
            "Angry (INTENSE)".to_string(),
            "Angry".to_string(),
        ]);
        assert_eq!(ranked, vec!["Angry (2)", "Angry (INTENSE)"]);
    }

    #[test]
    fn phrase_match_ignores_negation() {
        // Phrase matches are whole-text substring checks with no negation
        // window, unlike single-word triggers.
        assert_eq!(detect_mood("I am not over the moon"), vec!["Excited"]);
    }

    #[test]
    fn phrase_match_without_standalone_triggers() {
        assert_eq!(detect_mood("over the moon"), vec!["Excited"]);
    }

    #[test]
    fn phrase_and_token_matches_aggregate() {
        // "fed up" (phrase) plus "tired" (token), both Frustrated.
        assert_eq!(detect_mood("fed up and tired"), vec!["Frustrated (2)"]);
    }

    #[test]
    fn fallback_positive_polarity() {
        // No trigger words; the valence lexicon carries it over 0.4.
        assert_eq!(detect_mood("what a wonderful, perfect day"), vec!["Happy"]);
    }

    #[test]
    fn fallback_negative_polarity() {
        assert_eq!(detect_mood("this is terrible and awful"), vec!["Sad"]);
    }

    #[test]
    fn fallback_neutral_polarity() {
        assert_eq!(detect_mood("the bus arrives at noon"), vec!["Neutral"]);
    }

    #[test]
    fn ranking_orders_by_count_then_first_seen() {
        // sad, happy, sad -> Sad twice, Happy once.
        assert_eq!(detect_mood("sad then happy then sad"), vec!["Sad (2)", "Happy"]);
        // Exact tie keeps first-detected order.
        assert_eq!(detect_mood("sad and angry"), vec!["Sad", "Angry"]);
    }

    #[test]
    fn idempotent() {
        let input = "HYPED but also nervous, not sad though";
        assert_eq!(detect_mood(input), detect_mood(input));
    }
}
