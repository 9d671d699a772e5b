//! CLI response types returned as JSON by `quill` commands.
//!
//! These structs define the shape of JSON output for `quill revise`,
//! `quill score`, and `quill validate`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{GateCheck, Location, OutcomeKind};

/// Per-unit line of a batch run summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UnitReport {
    pub id: String,
    pub outcome: OutcomeKind,
    /// Where the unit lives after the pass; `None` when the pass failed before routing.
    pub location: Option<Location>,
    pub readability: Option<f64>,
    pub failed_checks: Vec<GateCheck>,
    /// Gate reasons, or the error chain for failed units.
    pub reasons: Vec<String>,
}

/// Unit counts of a batch run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RunCounts {
    pub approved: u32,
    pub needs_revision: u32,
    pub failed: u32,
}

/// Response from `quill revise`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RunSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub counts: RunCounts,
    pub units: Vec<UnitReport>,
}

impl RunSummary {
    /// Build a summary, deriving counts from the unit reports.
    #[must_use]
    pub fn new(
        run_id: String,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        units: Vec<UnitReport>,
    ) -> Self {
        let mut counts = RunCounts::default();
        for unit in &units {
            match unit.outcome {
                OutcomeKind::Approved => counts.approved += 1,
                OutcomeKind::NeedsRevision => counts.needs_revision += 1,
                OutcomeKind::Failed => counts.failed += 1,
            }
        }
        Self {
            run_id,
            started_at,
            finished_at,
            counts,
            units,
        }
    }
}

/// A single record that failed schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordValidationError {
    pub location: Location,
    pub id: String,
    pub message: String,
}

/// Response from `quill validate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationResponse {
    pub records_checked: u32,
    pub errors: Vec<RecordValidationError>,
}

impl ValidationResponse {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
