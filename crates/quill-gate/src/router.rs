//! Routing a judged unit to its destination.
//!
//! An approved unit moves `draft -> approved`: the approved copy is written
//! first, then the draft is removed. If the removal fails, the approved copy
//! is rolled back so the unit is never left in both locations unreported.

use quill_core::entities::{ContentMetadata, ContentUnit};
use quill_core::enums::{BrandComplianceState, FactVerificationState, GateCheck, Location};
use quill_core::thresholds::GateThresholds;
use quill_store::Store;

use crate::decision::Decision;
use crate::error::GateError;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub destination: Location,
    pub unit: ContentUnit,
}

/// The metadata a unit carries after `decision`.
///
/// Revision notes are replaced, not accumulated, so they always describe the
/// latest pass.
#[must_use]
pub fn revised_metadata(decision: &Decision) -> ContentMetadata {
    ContentMetadata {
        readability_score: Some(decision.readability),
        brand_compliance: if decision.passed(GateCheck::Brand) {
            BrandComplianceState::Approved
        } else {
            BrandComplianceState::NeedsRevision
        },
        fact_verification_status: if decision.passed(GateCheck::Accuracy) {
            FactVerificationState::Validated
        } else {
            FactVerificationState::NeedsVerification
        },
        revision_notes: decision.reasons.clone(),
        approved: decision.approved,
    }
}

/// Persist `unit` with the metadata implied by `decision`.
///
/// # Errors
///
/// - `GateError::AlreadyApproved` if `unit.id` is already in `approved`
/// - `GateError::Core` if the updated unit violates the approval invariant
/// - `GateError::Store` if a write fails before anything moved
/// - `GateError::StorageInconsistency` if the move was only partly applied
pub fn route<S: Store + ?Sized>(
    store: &S,
    unit: &ContentUnit,
    decision: &Decision,
    thresholds: &GateThresholds,
) -> Result<RouteOutcome, GateError> {
    let destination = if decision.approved {
        Location::Approved
    } else {
        Location::Draft
    };

    if store.contains(Location::Approved, &unit.id)?
        && !Location::Approved.can_transition_to(destination)
    {
        return Err(GateError::AlreadyApproved {
            id: unit.id.clone(),
        });
    }

    let updated = ContentUnit {
        metadata: revised_metadata(decision),
        ..unit.clone()
    };
    updated.check_approval_invariant(thresholds)?;

    match destination {
        Location::Draft => store.write(Location::Draft, &updated)?,
        Location::Approved => move_to_approved(store, &updated)?,
    }

    tracing::debug!(id = %updated.id, %destination, "unit routed");
    Ok(RouteOutcome {
        destination,
        unit: updated,
    })
}

fn move_to_approved<S: Store + ?Sized>(store: &S, unit: &ContentUnit) -> Result<(), GateError> {
    store.write(Location::Approved, unit)?;

    let Err(delete_error) = store.delete(Location::Draft, &unit.id) else {
        return Ok(());
    };

    tracing::warn!(id = %unit.id, error = %delete_error, "draft removal failed, rolling back");
    match store.delete(Location::Approved, &unit.id) {
        Ok(()) => Err(GateError::StorageInconsistency {
            id: unit.id.clone(),
            detail: format!(
                "draft removal failed ({delete_error}); approved copy rolled back"
            ),
            present_in: vec![Location::Draft],
        }),
        Err(rollback_error) => Err(GateError::StorageInconsistency {
            id: unit.id.clone(),
            detail: format!(
                "draft removal failed ({delete_error}) and rollback failed ({rollback_error})"
            ),
            present_in: vec![Location::Draft, Location::Approved],
        }),
    }
}
