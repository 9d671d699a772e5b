use quill_core::enums::Location;
use quill_core::responses::{RecordValidationError, ValidationResponse};
use quill_store::{Store, StoreError};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `quill validate`.
///
/// Prints the full report, then fails if any record is invalid.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = validate_records(&ctx.store)?;
    output(&report, flags.format)?;

    if !report.is_valid() {
        anyhow::bail!(
            "{} of {} records failed validation",
            report.errors.len(),
            report.records_checked
        );
    }
    Ok(())
}

/// Read every record in both locations through the schema-checking store.
pub fn validate_records<S: Store + ?Sized>(store: &S) -> anyhow::Result<ValidationResponse> {
    let mut records_checked = 0u32;
    let mut errors = Vec::new();

    for location in [Location::Draft, Location::Approved] {
        for id in store.list(location)? {
            records_checked += 1;
            let message = match store.read(location, &id) {
                Ok(Some(_)) => continue,
                Ok(None) => "record disappeared during validation".to_string(),
                Err(StoreError::Malformed { reason, .. }) => reason,
                Err(error) => error.to_string(),
            };
            errors.push(RecordValidationError {
                location,
                id,
                message,
            });
        }
    }

    // An id in both locations means a move was interrupted.
    for id in store.list(Location::Approved)? {
        if store.contains(Location::Draft, &id)? {
            errors.push(RecordValidationError {
                location: Location::Draft,
                id,
                message: "unit is present in both draft and approved".to_string(),
            });
        }
    }

    Ok(ValidationResponse {
        records_checked,
        errors,
    })
}
