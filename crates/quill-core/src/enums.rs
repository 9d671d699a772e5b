//! State enums for content units and their storage locations.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `Location` is a state machine and provides `allowed_next_states()` to enforce
//! valid routing at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// BrandComplianceState
// ---------------------------------------------------------------------------

/// Outcome of the brand-consistency check for a content unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BrandComplianceState {
    #[default]
    Pending,
    Approved,
    NeedsRevision,
}

impl BrandComplianceState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::NeedsRevision => "needs_revision",
        }
    }
}

impl fmt::Display for BrandComplianceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FactVerificationState
// ---------------------------------------------------------------------------

/// Outcome of the technical-accuracy check for a content unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactVerificationState {
    #[default]
    Pending,
    Validated,
    NeedsVerification,
}

impl FactVerificationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::NeedsVerification => "needs_verification",
        }
    }
}

impl fmt::Display for FactVerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Named storage location of a content unit.
///
/// ```text
/// draft → draft      (needs revision; metadata updated in place)
///       → approved   (terminal for the revision cycle)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Draft,
    Approved,
}

impl Location {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Draft, Self::Approved],
            Self::Approved => &[],
        }
    }

    /// Check whether routing to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Directory / key-space name used by stores.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GateCheck
// ---------------------------------------------------------------------------

/// One of the three independent dimensions evaluated by the decision gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GateCheck {
    Readability,
    Brand,
    Accuracy,
}

impl GateCheck {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Readability => "readability",
            Self::Brand => "brand",
            Self::Accuracy => "accuracy",
        }
    }
}

impl fmt::Display for GateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OutcomeKind
// ---------------------------------------------------------------------------

/// Result category of one unit in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Approved,
    NeedsRevision,
    Failed,
}

impl OutcomeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::NeedsRevision => "needs_revision",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_loop_or_approve() {
        assert!(Location::Draft.can_transition_to(Location::Draft));
        assert!(Location::Draft.can_transition_to(Location::Approved));
    }

    #[test]
    fn approved_is_terminal() {
        assert!(Location::Approved.allowed_next_states().is_empty());
        assert!(!Location::Approved.can_transition_to(Location::Draft));
    }

    #[test]
    fn states_serialize_snake_case() {
        let json = serde_json::to_string(&BrandComplianceState::NeedsRevision).unwrap();
        assert_eq!(json, "\"needs_revision\"");
        let json = serde_json::to_string(&FactVerificationState::NeedsVerification).unwrap();
        assert_eq!(json, "\"needs_verification\"");
    }

    #[test]
    fn display_matches_serde() {
        for state in [
            BrandComplianceState::Pending,
            BrandComplianceState::Approved,
            BrandComplianceState::NeedsRevision,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }
}
