use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BrandComplianceState, FactVerificationState};
use crate::errors::CoreError;
use crate::thresholds::GateThresholds;

/// Quality-gate metadata carried alongside a content unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContentMetadata {
    /// Flesch Reading Ease from the most recent gate pass.
    pub readability_score: Option<f64>,
    pub brand_compliance: BrandComplianceState,
    pub fact_verification_status: FactVerificationState,
    /// Reasons recorded by the most recent gate pass, in gate order.
    pub revision_notes: Vec<String>,
    pub approved: bool,
}

/// One piece of educational prose tracked through the revision pipeline.
///
/// This is also the persisted record format shared by every store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContentUnit {
    pub id: String,
    pub title: String,
    pub metadata: ContentMetadata,
    /// Prose with inline `[VERIFY]` markers.
    pub body: String,
}

impl ContentUnit {
    /// Create a fresh, unapproved unit as an upstream generator would.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            metadata: ContentMetadata::default(),
            body: body.into(),
        }
    }

    /// Check the approval invariant against the thresholds of the current run.
    ///
    /// `approved` implies brand compliance `approved`, fact verification
    /// `validated`, and a readability score at or above the floor. Unapproved
    /// units always satisfy it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Invariant` naming the first violated clause.
    pub fn check_approval_invariant(&self, thresholds: &GateThresholds) -> Result<(), CoreError> {
        let meta = &self.metadata;
        if !meta.approved {
            return Ok(());
        }

        let violation = |reason: String| CoreError::Invariant {
            id: self.id.clone(),
            reason,
        };

        if meta.brand_compliance != BrandComplianceState::Approved {
            return Err(violation(format!(
                "approved unit has brand_compliance '{}'",
                meta.brand_compliance
            )));
        }
        if meta.fact_verification_status != FactVerificationState::Validated {
            return Err(violation(format!(
                "approved unit has fact_verification_status '{}'",
                meta.fact_verification_status
            )));
        }
        match meta.readability_score {
            Some(score) if score >= thresholds.readability_floor() => Ok(()),
            Some(score) => Err(violation(format!(
                "approved unit has readability {score} below floor {}",
                thresholds.readability_floor()
            ))),
            None => Err(violation("approved unit has no readability score".to_string())),
        }
    }
}
