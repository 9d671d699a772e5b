//! One unit through the gate: score, annotate, evaluate, decide, route.
//!
//! Stages run strictly in that order. The unit must enter unapproved and
//! must satisfy the approval invariant once routed.

use quill_core::entities::{BrandGuidelines, ContentUnit};
use quill_core::enums::Location;
use quill_core::thresholds::GateThresholds;
use quill_store::Store;
use serde::Serialize;

use crate::annotate::{annotate, count_flags, strip_flags};
use crate::collaborators::{AccuracyValidator, Assessment, BrandChecker};
use crate::decision::{Decision, GateInput, decide};
use crate::error::GateError;
use crate::readability;
use crate::router::route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Score,
    Annotate,
    Evaluate,
    Decide,
    Route,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Score => "score",
            Self::Annotate => "annotate",
            Self::Evaluate => "evaluate",
            Self::Decide => "decide",
            Self::Route => "route",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    pub destination: Location,
    pub decision: Decision,
    pub unit: ContentUnit,
}

/// Runs the gate for one unit at a time against a store.
pub struct GatePass<'a, S: Store + ?Sized> {
    store: &'a S,
    thresholds: &'a GateThresholds,
    guidelines: &'a BrandGuidelines,
    accuracy: &'a dyn AccuracyValidator,
    brand: &'a dyn BrandChecker,
}

impl<'a, S: Store + ?Sized> GatePass<'a, S> {
    #[must_use]
    pub fn new(
        store: &'a S,
        thresholds: &'a GateThresholds,
        guidelines: &'a BrandGuidelines,
        accuracy: &'a dyn AccuracyValidator,
        brand: &'a dyn BrandChecker,
    ) -> Self {
        Self {
            store,
            thresholds,
            guidelines,
            accuracy,
            brand,
        }
    }

    /// Load `id` from `draft` and run it through the gate.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotFound` if no draft exists, or any error from
    /// [`Self::run_unit`].
    pub fn run_id(&self, id: &str) -> Result<PassOutcome, GateError> {
        let unit = self
            .store
            .read(Location::Draft, id)?
            .ok_or_else(|| GateError::NotFound {
                id: id.to_string(),
                location: Location::Draft,
            })?;
        self.run_unit(unit)
    }

    /// Run an already-loaded draft unit through every stage.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Stage` if the unit enters already approved, and
    /// routing errors from [`crate::router::route`].
    pub fn run_unit(&self, mut unit: ContentUnit) -> Result<PassOutcome, GateError> {
        let span = tracing::debug_span!("gate_pass", id = %unit.id);
        let _guard = span.enter();

        if unit.metadata.approved {
            return Err(stage_error(
                Stage::Score,
                &unit,
                "draft unit is marked approved",
            ));
        }

        // Markers from earlier passes are not prose.
        let readability = readability::score(&strip_flags(&unit.body));
        tracing::debug!(stage = %Stage::Score, readability);

        unit.body = annotate(&unit.body);
        tracing::debug!(stage = %Stage::Annotate, flags = count_flags(&unit.body));

        let accuracy = Assessment::from_accuracy(self.accuracy.validate(&unit.body));
        let brand = Assessment::from_brand(self.brand.check(&unit.body, self.guidelines));
        for (name, assessment) in [("accuracy", &accuracy), ("brand", &brand)] {
            if let Assessment::Failed { reason } = assessment {
                tracing::warn!(stage = %Stage::Evaluate, collaborator = name, %reason, "collaborator failed");
            }
        }
        let input = GateInput {
            readability,
            brand,
            accuracy,
        };

        let decision = decide(&input, self.thresholds);
        tracing::debug!(
            stage = %Stage::Decide,
            approved = decision.approved,
            failed = decision.failed_checks.len()
        );

        let routed = route(self.store, &unit, &decision, self.thresholds)?;
        if routed.unit.metadata.approved != (routed.destination == Location::Approved) {
            return Err(stage_error(
                Stage::Route,
                &routed.unit,
                "approval flag disagrees with destination",
            ));
        }
        routed.unit.check_approval_invariant(self.thresholds)?;
        tracing::debug!(stage = %Stage::Route, destination = %routed.destination);

        Ok(PassOutcome {
            destination: routed.destination,
            decision,
            unit: routed.unit,
        })
    }
}

fn stage_error(stage: Stage, unit: &ContentUnit, reason: &str) -> GateError {
    GateError::Stage {
        stage,
        id: unit.id.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        AccuracyReport, CollaboratorError, GuidelineBrandChecker, MarkerAccuracyValidator,
    };
    use pretty_assertions::assert_eq;
    use quill_core::enums::GateCheck;
    use quill_store::MemoryStore;

    struct Unavailable;

    impl AccuracyValidator for Unavailable {
        fn validate(&self, _body: &str) -> Result<AccuracyReport, CollaboratorError> {
            Err(CollaboratorError::Unavailable {
                collaborator: "accuracy validator",
                reason: "offline".to_string(),
            })
        }
    }

    fn thresholds() -> GateThresholds {
        GateThresholds {
            readability_target: 65.0,
            readability_tolerance: 5.0,
            brand_minimum: 85.0,
            accuracy_minimum: 90.0,
        }
    }

    fn seed(store: &MemoryStore, id: &str, body: &str) {
        store
            .write(Location::Draft, &ContentUnit::new(id, "Lesson", body))
            .unwrap();
    }

    #[test]
    fn plain_unit_is_approved() {
        let store = MemoryStore::new();
        seed(&store, "u1", "You hold the key. Keep it on paper. Store it well.");
        let (thresholds, guidelines) = (thresholds(), BrandGuidelines::default());
        let (accuracy, brand) = (MarkerAccuracyValidator::default(), GuidelineBrandChecker::default());
        let pass = GatePass::new(&store, &thresholds, &guidelines, &accuracy, &brand);

        let outcome = pass.run_id("u1").unwrap();
        assert_eq!(outcome.destination, Location::Approved);
        assert!(outcome.decision.approved);
        assert_eq!(store.locations_of("u1"), vec![Location::Approved]);
    }

    #[test]
    fn flagged_unit_stays_in_draft_with_markers() {
        let store = MemoryStore::new();
        seed(
            &store,
            "u1",
            "Bitcoin is always safe. It never fails. The price rose 15% in 2023.",
        );
        let thresholds = GateThresholds {
            accuracy_minimum: 95.0,
            ..thresholds()
        };
        let guidelines = BrandGuidelines::default();
        let (accuracy, brand) = (MarkerAccuracyValidator::default(), GuidelineBrandChecker::default());
        let pass = GatePass::new(&store, &thresholds, &guidelines, &accuracy, &brand);

        let outcome = pass.run_id("u1").unwrap();
        assert_eq!(outcome.destination, Location::Draft);
        assert_eq!(outcome.decision.failed_checks, vec![GateCheck::Accuracy]);
        let stored = store.read(Location::Draft, "u1").unwrap().unwrap();
        assert_eq!(count_flags(&stored.body), 5);
        assert!(
            stored
                .metadata
                .revision_notes
                .iter()
                .any(|note| note == "Technical accuracy: 90%")
        );
    }

    #[test]
    fn rerunning_a_draft_is_stable() {
        let store = MemoryStore::new();
        seed(&store, "u1", "It never fails. Bitcoin is always safe.");
        let thresholds = GateThresholds {
            accuracy_minimum: 95.0,
            ..thresholds()
        };
        let guidelines = BrandGuidelines::default();
        let (accuracy, brand) = (MarkerAccuracyValidator::default(), GuidelineBrandChecker::default());
        let pass = GatePass::new(&store, &thresholds, &guidelines, &accuracy, &brand);

        let first = pass.run_id("u1").unwrap();
        assert_eq!(first.destination, Location::Draft);
        let second = pass.run_id("u1").unwrap();
        assert_eq!(first.unit.body, second.unit.body);
        assert_eq!(first.decision, second.decision);
    }

    #[test]
    fn failed_collaborator_keeps_unit_in_draft() {
        let store = MemoryStore::new();
        seed(&store, "u1", "You hold the key. Keep it on paper.");
        let (thresholds, guidelines) = (thresholds(), BrandGuidelines::default());
        let brand = GuidelineBrandChecker::default();
        let pass = GatePass::new(&store, &thresholds, &guidelines, &Unavailable, &brand);

        let outcome = pass.run_id("u1").unwrap();
        assert_eq!(outcome.destination, Location::Draft);
        assert!(
            outcome
                .decision
                .reasons
                .contains(&"Technical accuracy: unavailable (accuracy validator unavailable: offline)".to_string())
        );
    }

    #[test]
    fn missing_draft_is_not_found() {
        let store = MemoryStore::new();
        let (thresholds, guidelines) = (thresholds(), BrandGuidelines::default());
        let (accuracy, brand) = (MarkerAccuracyValidator::default(), GuidelineBrandChecker::default());
        let pass = GatePass::new(&store, &thresholds, &guidelines, &accuracy, &brand);

        let err = pass.run_id("ghost").expect_err("absent");
        assert!(matches!(err, GateError::NotFound { .. }));
    }

    #[test]
    fn draft_marked_approved_is_rejected_at_entry() {
        let store = MemoryStore::new();
        let mut unit = ContentUnit::new("u1", "t", "Plain text.");
        unit.metadata.approved = true;
        let (thresholds, guidelines) = (thresholds(), BrandGuidelines::default());
        let (accuracy, brand) = (MarkerAccuracyValidator::default(), GuidelineBrandChecker::default());
        let pass = GatePass::new(&store, &thresholds, &guidelines, &accuracy, &brand);

        let err = pass.run_unit(unit).expect_err("entry check");
        assert!(matches!(
            err,
            GateError::Stage {
                stage: Stage::Score,
                ..
            }
        ));
        assert!(store.locations_of("u1").is_empty());
    }
}
