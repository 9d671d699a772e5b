//! Claim annotation.
//!
//! Detectors run over the prose with existing markers removed, and
//! [`MARKER`] is spliced in after every match end the text does not already
//! mark. Matching never sees a marker, so a marker can not create a new match
//! and `annotate(annotate(t)) == annotate(t)` for every `t`.
//!
//! Overlapping detectors may flag the same phrase twice (for example
//! "is always safe" yields a marker after "always" and another after "safe").
//! Both markers are kept.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Appended after every flagged span.
pub const MARKER: &str = " [VERIFY]";

/// The kind of claim a detector looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Percentage,
    MonetaryAmount,
    DatedEvent,
    AbsoluteLanguage,
    SecurityClaim,
}

struct Detector {
    kind: ClaimKind,
    pattern: Regex,
}

impl Detector {
    fn new(kind: ClaimKind, pattern: &str) -> Self {
        Self {
            kind,
            // Patterns are compile-time literals covered by tests.
            pattern: Regex::new(pattern).expect("detector pattern compiles"),
        }
    }
}

static DETECTORS: LazyLock<[Detector; 5]> = LazyLock::new(|| {
    [
        Detector::new(ClaimKind::Percentage, r"\d+(?:\.\d+)?%"),
        Detector::new(
            ClaimKind::MonetaryAmount,
            r"(?i)(?:\$\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:thousand|million|billion|trillion))?|\b\d[\d,]*(?:\.\d+)?\s?(?:btc|bitcoins?|sats|satoshis|usd|dollars|euros?)\b)",
        ),
        Detector::new(ClaimKind::DatedEvent, r"(?i)\b(?:in|since|by)\s+\d{4}\b"),
        Detector::new(
            ClaimKind::AbsoluteLanguage,
            r"(?i)\b(?:always|never|all|every|most|majority of)\b",
        ),
        Detector::new(
            ClaimKind::SecurityClaim,
            r"(?i)\b(?:is|are)\s+(?:\w+\s+)?(?:safe|secure)\b|\bguaranteed\b|\bensures\b|\bprevents\b",
        ),
    ]
});

/// Text with markers removed, plus the byte offset in the source text of
/// every byte kept.
struct Unmarked {
    prose: String,
    offsets: Vec<usize>,
}

impl Unmarked {
    fn new(text: &str) -> Self {
        let mut prose = String::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len());
        let mut kept_from = 0;
        for (at, _) in text.match_indices(MARKER) {
            prose.push_str(&text[kept_from..at]);
            offsets.extend(kept_from..at);
            kept_from = at + MARKER.len();
        }
        prose.push_str(&text[kept_from..]);
        offsets.extend(kept_from..text.len());
        Self { prose, offsets }
    }

    /// Source offset just past the prose byte before `end`.
    fn source_end(&self, end: usize) -> usize {
        self.offsets[end - 1] + 1
    }
}

/// Insert [`MARKER`] after every percentage, monetary amount, dated event,
/// absolute word, and security guarantee in `text`.
///
/// Ends shared by several detectors get a single marker.
#[must_use]
pub fn annotate(text: &str) -> String {
    let unmarked = Unmarked::new(text);
    let mut ends: Vec<usize> = DETECTORS
        .iter()
        .flat_map(|detector| detector.pattern.find_iter(&unmarked.prose))
        .filter(|found| !found.is_empty())
        .map(|found| unmarked.source_end(found.end()))
        .filter(|&end| !text[end..].starts_with(MARKER))
        .collect();
    ends.sort_unstable();
    ends.dedup();

    let mut out = String::with_capacity(text.len() + ends.len() * MARKER.len());
    let mut last = 0;
    for end in ends {
        out.push_str(&text[last..end]);
        out.push_str(MARKER);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Number of markers present in `text`.
#[must_use]
pub fn count_flags(text: &str) -> usize {
    text.matches(MARKER).count()
}

/// Remove every marker, recovering the prose the markers were added to.
#[must_use]
pub fn strip_flags(text: &str) -> String {
    text.replace(MARKER, "")
}

/// Claim kinds that would be flagged in `text`, in detector order.
#[must_use]
pub fn detect(text: &str) -> Vec<ClaimKind> {
    DETECTORS
        .iter()
        .filter(|detector| detector.pattern.is_match(text))
        .map(|detector| detector.kind)
        .collect()
}

/// Split text into sentences at `.`, `!`, `?`, trimming surrounding whitespace.
///
/// Trailing text without terminal punctuation forms its own sentence.
#[must_use]
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Sentences of an annotated text that carry at least one marker.
#[must_use]
pub fn flagged_sentences(text: &str) -> Vec<&str> {
    sentences(text)
        .into_iter()
        .filter(|sentence| sentence.contains(MARKER.trim_start()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn flags_absolute_security_percentage_and_year() {
        let text = "Bitcoin is always safe. It never fails. The price rose 15% in 2023.";
        assert_eq!(
            annotate(text),
            "Bitcoin is always [VERIFY] safe [VERIFY]. It never [VERIFY] fails. \
             The price rose 15% [VERIFY] in 2023 [VERIFY]."
        );
    }

    #[test]
    fn plain_prose_is_untouched() {
        let text = "A wallet stores keys. You can back it up on paper.";
        assert_eq!(annotate(text), text);
        assert_eq!(count_flags(text), 0);
    }

    #[rstest]
    #[case("Fees fell 2.5% last week.", "Fees fell 2.5% [VERIFY] last week.")]
    #[case("It cost $1,200 to run.", "It cost $1,200 [VERIFY] to run.")]
    #[case("Raised $4 million.", "Raised $4 million [VERIFY].")]
    #[case("I paid 0.5 BTC.", "I paid 0.5 BTC [VERIFY].")]
    #[case("Send 1000 sats.", "Send 1000 sats [VERIFY].")]
    #[case("Founded since 2009.", "Founded since 2009 [VERIFY].")]
    #[case("Most people agree.", "Most [VERIFY] people agree.")]
    #[case("The majority of nodes agree.", "The majority of [VERIFY] nodes agree.")]
    #[case("Hardware wallets are secure.", "Hardware wallets are secure [VERIFY].")]
    #[case("Multisig prevents theft.", "Multisig prevents [VERIFY] theft.")]
    #[case("Returns are guaranteed.", "Returns are guaranteed [VERIFY].")]
    fn each_detector_flags_its_claims(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(annotate(input), expected);
    }

    #[rstest]
    #[case("Bitcoin is always safe. It never fails. The price rose 15% in 2023.")]
    #[case("All coins are secure by 2030 and every node ensures 99.9% uptime.")]
    #[case("Pay $5 million or 12 BTC by 2025; most agree it is safe.")]
    #[case("Nothing to flag here.")]
    #[case("")]
    fn annotation_is_idempotent(#[case] text: &str) {
        let once = annotate(text);
        assert_eq!(annotate(&once), once);
    }

    #[rstest]
    #[case("million$5million12euro")]
    #[case("$5million [VERIFY]12euro")]
    #[case("is always [VERIFY] safe")]
    #[case("rose 15% [VERIFY] [VERIFY]")]
    fn marker_boundaries_do_not_create_new_matches(#[case] text: &str) {
        let once = annotate(text);
        assert_eq!(annotate(&once), once);
        assert_eq!(strip_flags(&once), strip_flags(text));
    }

    #[test]
    fn annotation_is_idempotent_over_generated_token_mixes() {
        const TOKENS: [&str; 14] = [
            "million", "$5", "12", "euro", "%", " ", "in 2023", "BTC", "always", "is safe",
            " [VERIFY]", "[VERIFY]", ".", "x",
        ];
        let mut text = String::new();
        for a in TOKENS {
            for b in TOKENS {
                for c in TOKENS {
                    for d in TOKENS {
                        text.clear();
                        for token in [a, b, c, d] {
                            text.push_str(token);
                        }
                        let once = annotate(&text);
                        assert_eq!(annotate(&once), once, "input: {text:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn existing_markers_are_not_duplicated() {
        let text = "Adoption grew 40% [VERIFY] this year.";
        assert_eq!(annotate(text), text);
    }

    #[test]
    fn strip_recovers_original_prose() {
        let text = "Bitcoin is always safe. The price rose 15% in 2023.";
        assert_eq!(strip_flags(&annotate(text)), text);
    }

    #[test]
    fn detect_lists_claim_kinds_in_order() {
        assert_eq!(
            detect("Since 2017 it is never down, up 5%."),
            vec![
                ClaimKind::Percentage,
                ClaimKind::DatedEvent,
                ClaimKind::AbsoluteLanguage
            ]
        );
    }

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        assert_eq!(
            sentences("One. Two!  Three? trailing"),
            vec!["One.", "Two!", "Three?", "trailing"]
        );
    }

    #[test]
    fn flagged_sentences_only_returns_marked_ones() {
        let annotated = annotate("Keys are yours. It never fails. Back up often.");
        assert_eq!(
            flagged_sentences(&annotated),
            vec!["It never [VERIFY] fails."]
        );
    }
}
