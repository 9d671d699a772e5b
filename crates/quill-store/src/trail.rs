//! JSONL decision trail writer.
//!
//! Appends `TrailEntry` records to per-run `<trail_dir>/{run_id}.jsonl` files.
//! Uses `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use quill_core::trail::TrailEntry;
use quill_schema::{SchemaRegistry, TRAIL_ENTRY};

use crate::error::StoreError;

/// Appends routing outcomes to per-run JSONL files.
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a new `TrailWriter` pointing at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&trail_dir).map_err(|source| StoreError::Io {
            path: trail_dir.clone(),
            source,
        })?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// Create a disabled writer (dry runs, tool calls).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append an entry to the run's JSONL file.
    ///
    /// File path: `{trail_dir}/{entry.run_id}.jsonl`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file write fails.
    pub fn append(&self, entry: &TrailEntry) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.run_path(&entry.run_id);
        serde_jsonlines::append_json_lines(&path, [entry])
            .map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// Append after checking the entry against the registered trail schema.
    ///
    /// Validation is warn-only; the entry is written regardless.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the file write fails.
    pub fn append_validated(
        &self,
        entry: &TrailEntry,
        schema: &SchemaRegistry,
    ) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }

        let value = serde_json::to_value(entry)?;
        if let Err(error) = schema.validate(TRAIL_ENTRY, &value) {
            tracing::warn!(
                run_id = %entry.run_id,
                unit_id = %entry.unit_id,
                %error,
                "trail entry failed schema validation"
            );
        }

        self.append(entry)
    }

    /// Read every entry of a run, in append order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read or a line fails to parse.
    pub fn read_run(&self, run_id: &str) -> Result<Vec<TrailEntry>, StoreError> {
        let path = self.run_path(run_id);
        serde_jsonlines::json_lines(&path)
            .and_then(|lines| lines.collect::<std::io::Result<Vec<TrailEntry>>>())
            .map_err(|source| StoreError::Io { path, source })
    }

    /// The directory where trail files are stored.
    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.trail_dir.join(format!("{run_id}.jsonl"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_core::enums::OutcomeKind;

    fn entry(unit_id: &str, outcome: OutcomeKind) -> TrailEntry {
        TrailEntry {
            v: 1,
            ts: "2026-02-08T12:00:00Z".to_string(),
            run_id: "run-1".to_string(),
            unit_id: unit_id.to_string(),
            outcome,
            readability: Some(60.0),
            reasons: vec!["Readability: 60 (target: 65)".to_string()],
        }
    }

    #[test]
    fn appends_in_order() {
        let temp = tempfile::tempdir().unwrap();
        let writer = TrailWriter::new(temp.path().join("trail")).unwrap();
        let schema = SchemaRegistry::new();

        writer
            .append_validated(&entry("a", OutcomeKind::Approved), &schema)
            .unwrap();
        writer.append(&entry("b", OutcomeKind::Failed)).unwrap();

        let entries = writer.read_run("run-1").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].unit_id, "a");
        assert_eq!(entries[1].outcome, OutcomeKind::Failed);
    }

    #[test]
    fn disabled_writer_writes_nothing() {
        let writer = TrailWriter::disabled();
        assert!(!writer.is_enabled());
        writer.append(&entry("a", OutcomeKind::Approved)).unwrap();
    }
}
