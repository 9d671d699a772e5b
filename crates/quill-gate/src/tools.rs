//! The gate's steps as named tool calls.
//!
//! Each tool takes and returns JSON. Input schemas are generated from the
//! input types so callers can discover what each tool accepts.

use quill_core::entities::BrandGuidelines;
use quill_core::thresholds::GateThresholds;
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::annotate::{annotate, count_flags, detect, strip_flags};
use crate::collaborators::{
    AccuracyValidator, Assessment, BrandChecker, GuidelineBrandChecker, MarkerAccuracyValidator,
};
use crate::decision::{GateInput, decide};
use crate::readability::analyze;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownOperation(String),

    #[error("invalid input for {tool}: {reason}")]
    InvalidInput { tool: String, reason: String },

    #[error("failed to encode {tool} output: {source}")]
    Output {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TextInput {
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DecideInput {
    pub readability: f64,
    pub brand_score: f64,
    pub accuracy_score: f64,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default)]
    pub flagged_claims: Vec<String>,
    pub thresholds: GateThresholds,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EvaluateInput {
    pub text: String,
    pub thresholds: GateThresholds,
    #[serde(default)]
    pub guidelines: BrandGuidelines,
}

pub const SCORE_READABILITY: &str = "score_readability";
pub const ANNOTATE_CLAIMS: &str = "annotate_claims";
pub const DECIDE: &str = "decide";
pub const EVALUATE_TEXT: &str = "evaluate_text";

pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
    accuracy: MarkerAccuracyValidator,
    brand: GuidelineBrandChecker,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(
            MarkerAccuracyValidator::default(),
            GuidelineBrandChecker::default(),
        )
    }

    /// Registry whose `evaluate_text` tool uses the given collaborators.
    #[must_use]
    pub fn with_collaborators(
        accuracy: MarkerAccuracyValidator,
        brand: GuidelineBrandChecker,
    ) -> Self {
        let tools = vec![
            ToolSpec {
                name: SCORE_READABILITY,
                description: "Flesch Reading Ease score with sentence, word and syllable counts",
                input_schema: schema_for!(TextInput).to_value(),
            },
            ToolSpec {
                name: ANNOTATE_CLAIMS,
                description: "Append [VERIFY] after claims that need a source",
                input_schema: schema_for!(TextInput).to_value(),
            },
            ToolSpec {
                name: DECIDE,
                description: "Approve or send back for revision given scores and thresholds",
                input_schema: schema_for!(DecideInput).to_value(),
            },
            ToolSpec {
                name: EVALUATE_TEXT,
                description: "Score, annotate and judge a text without storing it",
                input_schema: schema_for!(EvaluateInput).to_value(),
            },
        ];
        Self {
            tools,
            accuracy,
            brand,
        }
    }

    #[must_use]
    pub fn list(&self) -> &[ToolSpec] {
        &self.tools
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Invoke a tool by name.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::UnknownOperation` for an unregistered name and
    /// `ToolError::InvalidInput` when `input` does not fit the tool.
    pub fn call(&self, name: &str, input: Value) -> Result<Value, ToolError> {
        tracing::debug!(tool = name, "tool call");
        match name {
            SCORE_READABILITY => {
                let TextInput { text } = parse(name, input)?;
                encode(name, &analyze(&text))
            }
            ANNOTATE_CLAIMS => {
                let TextInput { text } = parse(name, input)?;
                let annotated = annotate(&text);
                Ok(json!({
                    "flags": count_flags(&annotated),
                    "claim_kinds": detect(&text),
                    "annotated": annotated,
                }))
            }
            DECIDE => {
                let input: DecideInput = parse(name, input)?;
                check_thresholds(name, &input.thresholds)?;
                let gate_input = GateInput {
                    readability: input.readability,
                    brand: Assessment::scored(
                        "brand_score",
                        input.brand_score,
                        input.improvement_suggestions,
                    ),
                    accuracy: Assessment::scored(
                        "accuracy_score",
                        input.accuracy_score,
                        input.flagged_claims,
                    ),
                };
                for assessment in [&gate_input.brand, &gate_input.accuracy] {
                    if let Assessment::Failed { reason } = assessment {
                        return Err(invalid(name, reason.clone()));
                    }
                }
                encode(name, &decide(&gate_input, &input.thresholds))
            }
            EVALUATE_TEXT => {
                let input: EvaluateInput = parse(name, input)?;
                check_thresholds(name, &input.thresholds)?;
                let readability = analyze(&strip_flags(&input.text)).score;
                let annotated = annotate(&input.text);
                let gate_input = GateInput {
                    readability,
                    brand: Assessment::from_brand(self.brand.check(&annotated, &input.guidelines)),
                    accuracy: Assessment::from_accuracy(self.accuracy.validate(&annotated)),
                };
                let decision = decide(&gate_input, &input.thresholds);
                Ok(json!({
                    "annotated": annotated,
                    "decision": encode(name, &decision)?,
                }))
            }
            other => Err(ToolError::UnknownOperation(other.to_string())),
        }
    }
}

fn parse<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|error| invalid(tool, error.to_string()))
}

fn encode<T: Serialize>(tool: &str, output: &T) -> Result<Value, ToolError> {
    serde_json::to_value(output).map_err(|source| ToolError::Output {
        tool: tool.to_string(),
        source,
    })
}

fn check_thresholds(tool: &str, thresholds: &GateThresholds) -> Result<(), ToolError> {
    thresholds
        .validate()
        .map_err(|error| invalid(tool, error.to_string()))
}

fn invalid(tool: &str, reason: String) -> ToolError {
    ToolError::InvalidInput {
        tool: tool.to_string(),
        reason,
    }
}
