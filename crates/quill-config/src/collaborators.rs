//! Settings for the built-in accuracy validator and brand checker.

use quill_core::entities::BrandGuidelines;
use serde::{Deserialize, Serialize};

const fn default_flag_penalty() -> f64 {
    2.0
}

const fn default_forbidden_penalty() -> f64 {
    10.0
}

const fn default_missing_penalty() -> f64 {
    5.0
}

const fn default_long_sentence_penalty() -> f64 {
    2.0
}

const fn default_max_sentence_words() -> Option<usize> {
    Some(25)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccuracyConfig {
    /// Points deducted per unverified `[VERIFY]` claim.
    #[serde(default = "default_flag_penalty")]
    pub flag_penalty: f64,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            flag_penalty: default_flag_penalty(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub required_terms: Vec<String>,

    #[serde(default)]
    pub forbidden_terms: Vec<String>,

    #[serde(default = "default_max_sentence_words")]
    pub max_sentence_words: Option<usize>,

    /// Points deducted per forbidden term occurrence.
    #[serde(default = "default_forbidden_penalty")]
    pub forbidden_penalty: f64,

    /// Points deducted per required term that never appears.
    #[serde(default = "default_missing_penalty")]
    pub missing_penalty: f64,

    /// Points deducted per sentence over `max_sentence_words`.
    #[serde(default = "default_long_sentence_penalty")]
    pub long_sentence_penalty: f64,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            required_terms: Vec::new(),
            forbidden_terms: Vec::new(),
            max_sentence_words: default_max_sentence_words(),
            forbidden_penalty: default_forbidden_penalty(),
            missing_penalty: default_missing_penalty(),
            long_sentence_penalty: default_long_sentence_penalty(),
        }
    }
}

impl BrandConfig {
    /// The guideline object passed to the brand checker.
    #[must_use]
    pub fn guidelines(&self) -> BrandGuidelines {
        BrandGuidelines {
            name: self.name.clone(),
            required_terms: self.required_terms.clone(),
            forbidden_terms: self.forbidden_terms.clone(),
            max_sentence_words: self.max_sentence_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert!((AccuracyConfig::default().flag_penalty - 2.0).abs() < f64::EPSILON);
        let brand = BrandConfig::default();
        assert!(brand.required_terms.is_empty());
        assert_eq!(brand.max_sentence_words, Some(25));
        assert!((brand.forbidden_penalty - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn guidelines_copy_terms() {
        let brand = BrandConfig {
            name: "Orange Academy".into(),
            forbidden_terms: vec!["moon".into()],
            ..Default::default()
        };
        let guidelines = brand.guidelines();
        assert_eq!(guidelines.name, "Orange Academy");
        assert_eq!(guidelines.forbidden_terms, vec!["moon".to_string()]);
    }
}
