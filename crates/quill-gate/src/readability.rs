//! Flesch Reading Ease scoring.
//!
//! Counts are heuristic and intentionally simple so scores are reproducible
//! across runs and implementations:
//! - sentences: terminal punctuation characters (`.`, `!`, `?`), at least 1
//! - words: whitespace-separated tokens, at least 1
//! - syllables: maximal runs of `[aeiouy]`, at least one per word

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const BASE: f64 = 206.835;
const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
const SYLLABLE_WEIGHT: f64 = 84.6;

/// Counts and averages behind a readability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    pub avg_sentence_length: f64,
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease, rounded to one decimal. Higher is easier.
    pub score: f64,
}

/// Score `text` on the Flesch Reading Ease scale.
#[must_use]
pub fn score(text: &str) -> f64 {
    analyze(text).score
}

/// Compute the full readability breakdown for `text`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze(text: &str) -> ReadabilityReport {
    let sentences = count_sentences(text).max(1);
    let words = count_words(text).max(1);
    let syllables = count_vowel_runs(text).max(words);

    let avg_sentence_length = words as f64 / sentences as f64;
    let avg_syllables_per_word = syllables as f64 / words as f64;
    let raw = SYLLABLE_WEIGHT.mul_add(
        -avg_syllables_per_word,
        SENTENCE_LENGTH_WEIGHT.mul_add(-avg_sentence_length, BASE),
    );

    ReadabilityReport {
        sentences,
        words,
        syllables,
        avg_sentence_length,
        avg_syllables_per_word,
        score: round_one_decimal(raw),
    }
}

fn count_sentences(text: &str) -> usize {
    text.chars()
        .filter(|ch| matches!(ch, '.' | '!' | '?'))
        .count()
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn count_vowel_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for ch in text.chars() {
        let vowel = matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_run {
            runs += 1;
        }
        in_run = vowel;
    }
    runs
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn short_declarative_sentence() {
        let report = analyze("Bitcoin is money.");
        assert_eq!(report.sentences, 1);
        assert_eq!(report.words, 3);
        // Bit-coin, is, mon-ey
        assert_eq!(report.syllables, 5);
        assert!(close(report.avg_sentence_length, 3.0));
        assert!(close(report.score, 62.8), "got {}", report.score);
    }

    #[test]
    fn plain_text_scores_as_very_easy() {
        let value = score("The cat sat. The dog ran.");
        assert!(value > 80.0, "got {value}");
        assert!(close(value, 119.2));
    }

    #[test]
    fn dense_text_scores_lower_than_plain_text() {
        let plain = score("You hold the key. Keep it safe.");
        let dense = score(
            "Cryptographic authentication infrastructure necessitates comprehensive \
             operational verification methodologies.",
        );
        assert!(dense < plain);
        assert!(dense < 0.0, "got {dense}");
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t ")]
    #[case("...")]
    fn degenerate_input_uses_floor_counts(#[case] text: &str) {
        let report = analyze(text);
        assert_eq!(report.words, 1);
        assert_eq!(report.syllables, 1);
        if text.contains('.') {
            assert_eq!(report.sentences, 3);
        } else {
            assert_eq!(report.sentences, 1);
            assert!(close(report.score, 121.2));
        }
    }

    #[rstest]
    #[case("rhythm", 1)]
    #[case("queue", 1)]
    #[case("Beautiful", 3)]
    #[case("AEIOU", 1)]
    #[case("b c d", 0)]
    fn vowel_runs_are_counted_case_insensitively(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(count_vowel_runs(text), expected);
    }

    #[test]
    fn syllables_never_fall_below_word_count() {
        let report = analyze("Tsk psst hmm.");
        assert_eq!(report.words, 3);
        assert_eq!(report.syllables, 3);
    }

    #[test]
    fn every_terminal_mark_counts_as_a_sentence() {
        let report = analyze("Wait! Really? Yes.");
        assert_eq!(report.sentences, 3);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Miners bundle transactions into blocks. Each block links to the last.";
        let first = score(text);
        for _ in 0..10 {
            assert!(close(score(text), first));
        }
    }

    #[test]
    fn score_has_at_most_one_decimal() {
        let value = score("Proof of work secures the chain against rewriting history.");
        assert!(close((value * 10.0).round(), value * 10.0));
        assert!(value.is_finite());
    }
}
