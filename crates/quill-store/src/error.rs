//! Store error types.

use std::path::PathBuf;

use quill_core::enums::Location;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unit id cannot address a record.
    #[error(transparent)]
    InvalidId(#[from] quill_core::errors::CoreError),

    /// The persisted record could not be parsed into a content unit.
    #[error("Malformed record {location}/{id}: {reason}")]
    Malformed {
        location: Location,
        id: String,
        reason: String,
    },

    /// Filesystem failure, with the path that was being touched.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store refused the operation.
    #[error("{op} failed for {location}/{id}: {reason}")]
    Unavailable {
        op: StoreOp,
        location: Location,
        id: String,
        reason: String,
    },
}

/// Store operation names, used in error reports and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Read,
    Write,
    Delete,
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        })
    }
}
