//! Accuracy and brand collaborators.
//!
//! The gate consumes collaborator results as [`Assessment`]s. A collaborator
//! that errors, or returns a score outside `0..=100`, becomes
//! [`Assessment::Failed`] and its check fails closed in the decision gate.
//!
//! The bundled implementations are deterministic heuristics:
//! - [`MarkerAccuracyValidator`] penalizes `[VERIFY]` markers
//! - [`GuidelineBrandChecker`] scores against [`BrandGuidelines`] terms and
//!   sentence length

use quill_core::entities::BrandGuidelines;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::annotate::{count_flags, flagged_sentences, sentences};

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{collaborator} unavailable: {reason}")]
    Unavailable {
        collaborator: &'static str,
        reason: String,
    },

    #[error("{collaborator} rejected its configuration: {reason}")]
    Misconfigured {
        collaborator: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AccuracyReport {
    pub accuracy_score: f64,
    pub flagged_claims: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrandReport {
    pub consistency_score: f64,
    pub improvement_suggestions: Vec<String>,
}

/// Scores the factual accuracy of an annotated body.
pub trait AccuracyValidator {
    /// # Errors
    ///
    /// Returns `CollaboratorError` when no assessment could be produced.
    fn validate(&self, body: &str) -> Result<AccuracyReport, CollaboratorError>;
}

/// Scores how well a body follows the brand guidelines.
pub trait BrandChecker {
    /// # Errors
    ///
    /// Returns `CollaboratorError` when no assessment could be produced.
    fn check(
        &self,
        body: &str,
        guidelines: &BrandGuidelines,
    ) -> Result<BrandReport, CollaboratorError>;
}

/// A collaborator result as the decision gate sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assessment {
    Scored { score: f64, notes: Vec<String> },
    Failed { reason: String },
}

impl Assessment {
    /// Accept a score only if it is finite and within `0..=100`.
    #[must_use]
    pub fn scored(collaborator: &str, score: f64, notes: Vec<String>) -> Self {
        if score.is_finite() && (0.0..=100.0).contains(&score) {
            Self::Scored { score, notes }
        } else {
            Self::Failed {
                reason: format!("{collaborator} returned out-of-range score {score}"),
            }
        }
    }

    #[must_use]
    pub fn from_accuracy(result: Result<AccuracyReport, CollaboratorError>) -> Self {
        match result {
            Ok(report) => Self::scored(
                "accuracy validator",
                report.accuracy_score,
                report.flagged_claims,
            ),
            Err(error) => Self::Failed {
                reason: error.to_string(),
            },
        }
    }

    #[must_use]
    pub fn from_brand(result: Result<BrandReport, CollaboratorError>) -> Self {
        match result {
            Ok(report) => Self::scored(
                "brand checker",
                report.consistency_score,
                report.improvement_suggestions,
            ),
            Err(error) => Self::Failed {
                reason: error.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        match self {
            Self::Scored { score, .. } => Some(*score),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        match self {
            Self::Scored { notes, .. } => notes,
            Self::Failed { .. } => &[],
        }
    }
}

/// Deducts a fixed penalty per `[VERIFY]` marker.
#[derive(Debug, Clone, Copy)]
pub struct MarkerAccuracyValidator {
    pub flag_penalty: f64,
}

impl Default for MarkerAccuracyValidator {
    fn default() -> Self {
        Self { flag_penalty: 2.0 }
    }
}

impl AccuracyValidator for MarkerAccuracyValidator {
    #[allow(clippy::cast_precision_loss)]
    fn validate(&self, body: &str) -> Result<AccuracyReport, CollaboratorError> {
        if !self.flag_penalty.is_finite() || self.flag_penalty < 0.0 {
            return Err(CollaboratorError::Misconfigured {
                collaborator: "accuracy validator",
                reason: format!("flag_penalty must be >= 0, got {}", self.flag_penalty),
            });
        }

        let flags = count_flags(body) as f64;
        let accuracy_score = self.flag_penalty.mul_add(-flags, 100.0).max(0.0);
        let flagged_claims = flagged_sentences(body)
            .into_iter()
            .map(|sentence| format!("Flagged claim: {sentence}"))
            .collect();

        Ok(AccuracyReport {
            accuracy_score,
            flagged_claims,
        })
    }
}

/// Per-finding deductions for [`GuidelineBrandChecker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandPenalties {
    pub forbidden_term: f64,
    pub missing_term: f64,
    pub long_sentence: f64,
}

impl Default for BrandPenalties {
    fn default() -> Self {
        Self {
            forbidden_term: 10.0,
            missing_term: 5.0,
            long_sentence: 2.0,
        }
    }
}

/// Checks required and forbidden terms plus a sentence-length ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidelineBrandChecker {
    pub penalties: BrandPenalties,
}

impl GuidelineBrandChecker {
    #[must_use]
    pub const fn new(penalties: BrandPenalties) -> Self {
        Self { penalties }
    }
}

impl BrandChecker for GuidelineBrandChecker {
    #[allow(clippy::cast_precision_loss)]
    fn check(
        &self,
        body: &str,
        guidelines: &BrandGuidelines,
    ) -> Result<BrandReport, CollaboratorError> {
        let mut score = 100.0_f64;
        let mut suggestions = Vec::new();
        let brand = if guidelines.name.is_empty() {
            "the brand".to_string()
        } else {
            guidelines.name.clone()
        };

        for term in non_empty(&guidelines.forbidden_terms) {
            let hits = occurrences(body, term)?;
            if hits > 0 {
                score = self.penalties.forbidden_term.mul_add(-(hits as f64), score);
                suggestions.push(format!(
                    "Replace '{term}' (used {hits} time{}); it does not fit {brand}",
                    if hits == 1 { "" } else { "s" }
                ));
            }
        }

        for term in non_empty(&guidelines.required_terms) {
            if occurrences(body, term)? == 0 {
                score -= self.penalties.missing_term;
                suggestions.push(format!("Mention '{term}' at least once"));
            }
        }

        if let Some(limit) = guidelines.max_sentence_words {
            for sentence in sentences(body) {
                let words = sentence.split_whitespace().count();
                if words > limit {
                    score -= self.penalties.long_sentence;
                    let opening: Vec<&str> = sentence.split_whitespace().take(6).collect();
                    suggestions.push(format!(
                        "Shorten the sentence starting \"{}...\" ({words} words, limit {limit})",
                        opening.join(" ")
                    ));
                }
            }
        }

        Ok(BrandReport {
            consistency_score: score.clamp(0.0, 100.0),
            improvement_suggestions: suggestions,
        })
    }
}

fn non_empty(terms: &[String]) -> impl Iterator<Item = &str> {
    terms.iter().map(|term| term.trim()).filter(|term| !term.is_empty())
}

/// Case-insensitive whole-term count. A word boundary is required only on a
/// side where the term starts or ends with a word character.
fn occurrences(body: &str, term: &str) -> Result<usize, CollaboratorError> {
    let boundary = |edge: Option<char>| {
        if edge.is_some_and(|ch| ch.is_alphanumeric() || ch == '_') {
            r"\b"
        } else {
            ""
        }
    };
    let source = format!(
        "(?i){}{}{}",
        boundary(term.chars().next()),
        regex::escape(term),
        boundary(term.chars().next_back())
    );
    let pattern = Regex::new(&source).map_err(|error| {
        CollaboratorError::Misconfigured {
            collaborator: "brand checker",
            reason: format!("term '{term}': {error}"),
        }
    })?;
    Ok(pattern.find_iter(body).count())
}
