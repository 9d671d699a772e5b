//! Unit id validation.
//!
//! Ids are opaque to the gate but become file names in the filesystem store,
//! so they are restricted to a portable character set.

use crate::errors::CoreError;

/// Maximum id length in bytes.
pub const MAX_ID_LEN: usize = 128;

/// Validate that `id` can address a record in any store.
///
/// # Errors
///
/// Returns `CoreError::InvalidId` if the id is empty, too long, starts with a
/// dot, or contains characters outside `[A-Za-z0-9._-]`.
pub fn validate_unit_id(id: &str) -> Result<(), CoreError> {
    let invalid = |reason: &str| CoreError::InvalidId {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.is_empty() {
        return Err(invalid("id is empty"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(invalid("id is longer than 128 bytes"));
    }
    if id.starts_with('.') {
        return Err(invalid("id must not start with '.'"));
    }
    if let Some(ch) = id
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')))
    {
        return Err(invalid(&format!("unsupported character {ch:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_ids() {
        for id in ["lesson-01", "module_2.intro", "a", "BTC-101"] {
            assert!(validate_unit_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_path_like_ids() {
        for id in ["", "../etc", ".hidden", "a/b", "a b", "lesson\\1"] {
            assert!(validate_unit_id(id).is_err(), "{id:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_ids() {
        let id = "x".repeat(MAX_ID_LEN + 1);
        let err = validate_unit_id(&id).expect_err("too long");
        assert!(err.to_string().contains("128"));
    }
}
