//! Cross-cutting error types for Quill.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `StoreError`, `GateError`) are defined in
//! their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Quill crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A unit id cannot be used as a store key.
    #[error("Invalid unit id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// A content unit violates the approval invariant.
    #[error("Invariant violated for unit {id}: {reason}")]
    Invariant { id: String, reason: String },

    /// Data failed validation (thresholds, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
