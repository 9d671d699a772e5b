use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brand guideline object handed to the brand checker on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BrandGuidelines {
    /// Brand display name, used in suggestions.
    #[serde(default)]
    pub name: String,
    /// Terms every unit is expected to mention.
    #[serde(default)]
    pub required_terms: Vec<String>,
    /// Terms the brand never uses.
    #[serde(default)]
    pub forbidden_terms: Vec<String>,
    /// Longest sentence, in words, that fits the brand voice. `None` disables the check.
    #[serde(default)]
    pub max_sentence_words: Option<usize>,
}
