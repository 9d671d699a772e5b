//! JSONL decision trail envelope.
//!
//! Every unit processed by a revision run is recorded as a `TrailEntry` in
//! `<root>/trail/{run_id}.jsonl`, failures included.
//!
//! The `v` field supports schema versioning: entries without a `v` field
//! deserialize with `v == 1` via `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OutcomeKind;

const fn default_trail_version() -> u32 {
    1
}

/// A single routing outcome recorded in the trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TrailEntry {
    /// Schema version. Defaults to 1 when absent.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// ISO 8601 timestamp of the outcome.
    pub ts: String,

    /// Run that produced this entry.
    pub run_id: String,

    /// Unit the entry is about.
    pub unit_id: String,

    pub outcome: OutcomeKind,

    /// Readability computed in this pass, if the pass got that far.
    pub readability: Option<f64>,

    /// Gate reasons, or the error chain for failures.
    pub reasons: Vec<String>,
}
