use quill_core::enums::Location;
use quill_core::errors::CoreError;
use quill_store::StoreError;
use thiserror::Error;

use crate::pass::Stage;

/// Errors from evaluating or routing a single unit.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A post-routing invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unit '{id}' is not in {location}")]
    NotFound { id: String, location: Location },

    /// Approved records are immutable; re-gating one is refused.
    #[error("unit '{id}' is already approved")]
    AlreadyApproved { id: String },

    /// The unit reached a stage in a state that stage cannot accept.
    #[error("{stage} stage rejected unit '{id}': {reason}")]
    Stage {
        stage: Stage,
        id: String,
        reason: String,
    },

    /// A move between locations was only partly applied.
    #[error("storage inconsistency for unit '{id}': {detail}")]
    StorageInconsistency {
        id: String,
        detail: String,
        /// Locations that hold the unit after the failed move.
        present_in: Vec<Location>,
    },
}
