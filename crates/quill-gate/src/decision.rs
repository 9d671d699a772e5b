//! The approve/revise decision.

use quill_core::enums::GateCheck;
use quill_core::thresholds::GateThresholds;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collaborators::Assessment;

/// Everything the gate needs to judge one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateInput {
    pub readability: f64,
    pub brand: Assessment,
    pub accuracy: Assessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    pub approved: bool,
    pub readability: f64,
    /// Checks that did not pass, in evaluation order.
    pub failed_checks: Vec<GateCheck>,
    /// One diagnostic line per check, then brand suggestions, then flagged claims.
    pub reasons: Vec<String>,
}

impl Decision {
    #[must_use]
    pub fn passed(&self, check: GateCheck) -> bool {
        !self.failed_checks.contains(&check)
    }
}

/// Judge `input` against `thresholds`.
///
/// All three checks are always evaluated so the reasons describe every
/// shortfall, not just the first. A collaborator that failed counts as a
/// failed check.
#[must_use]
pub fn decide(input: &GateInput, thresholds: &GateThresholds) -> Decision {
    let mut failed_checks = Vec::new();
    let mut reasons = Vec::with_capacity(3);

    let readability_ok =
        input.readability.is_finite() && input.readability >= thresholds.readability_floor();
    if !readability_ok {
        failed_checks.push(GateCheck::Readability);
    }
    reasons.push(format!(
        "Readability: {} (target: {})",
        input.readability, thresholds.readability_target
    ));

    let (brand_ok, brand_line) =
        judge(&input.brand, thresholds.brand_minimum, "Brand consistency");
    if !brand_ok {
        failed_checks.push(GateCheck::Brand);
    }
    reasons.push(brand_line);

    let (accuracy_ok, accuracy_line) = judge(
        &input.accuracy,
        thresholds.accuracy_minimum,
        "Technical accuracy",
    );
    if !accuracy_ok {
        failed_checks.push(GateCheck::Accuracy);
    }
    reasons.push(accuracy_line);

    reasons.extend(input.brand.notes().iter().cloned());
    reasons.extend(input.accuracy.notes().iter().cloned());

    Decision {
        approved: failed_checks.is_empty(),
        readability: input.readability,
        failed_checks,
        reasons,
    }
}

fn judge(assessment: &Assessment, minimum: f64, label: &str) -> (bool, String) {
    match assessment {
        Assessment::Scored { score, .. } => (*score >= minimum, format!("{label}: {score}%")),
        Assessment::Failed { reason } => (false, format!("{label}: unavailable ({reason})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn thresholds() -> GateThresholds {
        GateThresholds {
            readability_target: 65.0,
            readability_tolerance: 5.0,
            brand_minimum: 85.0,
            accuracy_minimum: 90.0,
        }
    }

    fn scored(score: f64, notes: &[&str]) -> Assessment {
        Assessment::Scored {
            score,
            notes: notes.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn all_checks_passing_approves() {
        let decision = decide(
            &GateInput {
                readability: 70.0,
                brand: scored(90.0, &[]),
                accuracy: scored(95.0, &[]),
            },
            &thresholds(),
        );
        assert!(decision.approved);
        assert!(decision.failed_checks.is_empty());
        assert_eq!(
            decision.reasons,
            vec![
                "Readability: 70 (target: 65)",
                "Brand consistency: 90%",
                "Technical accuracy: 95%",
            ]
        );
    }

    #[test]
    fn low_readability_alone_rejects() {
        let decision = decide(
            &GateInput {
                readability: 55.0,
                brand: scored(90.0, &[]),
                accuracy: scored(95.0, &[]),
            },
            &thresholds(),
        );
        assert!(!decision.approved);
        assert_eq!(decision.failed_checks, vec![GateCheck::Readability]);
        assert_eq!(decision.reasons[0], "Readability: 55 (target: 65)");
    }

    #[test]
    fn readability_at_the_floor_passes() {
        let decision = decide(
            &GateInput {
                readability: 60.0,
                brand: scored(85.0, &[]),
                accuracy: scored(90.0, &[]),
            },
            &thresholds(),
        );
        assert!(decision.approved);
    }

    #[test]
    fn low_accuracy_carries_flagged_claims() {
        let decision = decide(
            &GateInput {
                readability: 70.0,
                brand: scored(90.0, &["Use 'self-custody'"]),
                accuracy: scored(80.0, &["Flagged claim: X"]),
            },
            &thresholds(),
        );
        assert!(!decision.approved);
        assert!(!decision.passed(GateCheck::Accuracy));
        assert!(decision.passed(GateCheck::Brand));
        assert_eq!(
            decision.reasons,
            vec![
                "Readability: 70 (target: 65)",
                "Brand consistency: 90%",
                "Technical accuracy: 80%",
                "Use 'self-custody'",
                "Flagged claim: X",
            ]
        );
    }

    #[test]
    fn every_shortfall_is_reported() {
        let decision = decide(
            &GateInput {
                readability: 20.0,
                brand: scored(10.0, &[]),
                accuracy: scored(10.0, &[]),
            },
            &thresholds(),
        );
        assert_eq!(
            decision.failed_checks,
            vec![GateCheck::Readability, GateCheck::Brand, GateCheck::Accuracy]
        );
    }

    #[test]
    fn failed_collaborator_fails_its_check() {
        let decision = decide(
            &GateInput {
                readability: 70.0,
                brand: Assessment::Failed {
                    reason: "timeout".to_string(),
                },
                accuracy: scored(99.0, &[]),
            },
            &thresholds(),
        );
        assert!(!decision.approved);
        assert_eq!(decision.failed_checks, vec![GateCheck::Brand]);
        assert_eq!(decision.reasons[1], "Brand consistency: unavailable (timeout)");
    }

    #[test]
    fn non_finite_readability_fails() {
        let decision = decide(
            &GateInput {
                readability: f64::NAN,
                brand: scored(100.0, &[]),
                accuracy: scored(100.0, &[]),
            },
            &thresholds(),
        );
        assert_eq!(decision.failed_checks, vec![GateCheck::Readability]);
    }
}
