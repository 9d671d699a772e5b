//! Filesystem-backed store.
//!
//! Layout under `root`:
//!
//! ```text
//! draft/<id>.json
//! approved/<id>.json
//! ```
//!
//! Writes go to a dot-prefixed temp file in the same directory and are renamed
//! into place, so a reader never observes a half-written record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quill_core::entities::ContentUnit;
use quill_core::enums::Location;
use quill_core::ids::validate_unit_id;
use quill_schema::{CONTENT_RECORD, SchemaRegistry};

use crate::Store;
use crate::error::StoreError;

const RECORD_EXT: &str = "json";

pub struct FsStore {
    root: PathBuf,
    schema: SchemaRegistry,
}

impl FsStore {
    /// Open a store rooted at `root`. Directories are created lazily on write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schema: SchemaRegistry::new(),
        }
    }

    /// Create the `draft/` and `approved/` directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a directory cannot be created.
    pub fn init(&self) -> Result<(), StoreError> {
        for location in [Location::Draft, Location::Approved] {
            let dir = self.location_dir(location);
            std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir, source })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn location_dir(&self, location: Location) -> PathBuf {
        self.root.join(location.as_str())
    }

    fn record_path(&self, location: Location, id: &str) -> PathBuf {
        self.location_dir(location)
            .join(format!("{id}.{RECORD_EXT}"))
    }

    fn malformed(location: Location, id: &str, reason: impl Into<String>) -> StoreError {
        StoreError::Malformed {
            location,
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

impl Store for FsStore {
    fn read(&self, location: Location, id: &str) -> Result<Option<ContentUnit>, StoreError> {
        validate_unit_id(id)?;
        let path = self.record_path(location, id);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|error| Self::malformed(location, id, format!("invalid JSON: {error}")))?;

        self.schema
            .validate(CONTENT_RECORD, &value)
            .map_err(|error| Self::malformed(location, id, error.to_string()))?;

        let unit: ContentUnit = serde_json::from_value(value)
            .map_err(|error| Self::malformed(location, id, error.to_string()))?;

        if unit.id != id {
            return Err(Self::malformed(
                location,
                id,
                format!("record id '{}' does not match its key", unit.id),
            ));
        }

        Ok(Some(unit))
    }

    fn write(&self, location: Location, unit: &ContentUnit) -> Result<(), StoreError> {
        validate_unit_id(&unit.id)?;
        let dir = self.location_dir(location);
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = self.record_path(location, &unit.id);
        let tmp_path = dir.join(format!(".{}.{RECORD_EXT}.tmp", unit.id));
        let rendered = serde_json::to_string_pretty(unit)?;

        if let Err(source) = std::fs::write(&tmp_path, rendered) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: tmp_path,
                source,
            });
        }
        if let Err(source) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path, source });
        }

        tracing::debug!(%location, id = %unit.id, "record written");
        Ok(())
    }

    fn delete(&self, location: Location, id: &str) -> Result<(), StoreError> {
        validate_unit_id(id)?;
        let path = self.record_path(location, id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(%location, id, "record deleted");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn contains(&self, location: Location, id: &str) -> Result<bool, StoreError> {
        validate_unit_id(id)?;
        Ok(self.record_path(location, id).is_file())
    }

    fn list(&self, location: Location) -> Result<Vec<String>, StoreError> {
        let dir = self.location_dir(location);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            ids.push(stem.to_string());
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> (tempfile::TempDir, FsStore) {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let store = FsStore::new(temp.path());
        (temp, store)
    }

    #[test]
    fn missing_record_reads_as_none() {
        let (_temp, store) = store();
        assert_eq!(store.read(Location::Draft, "lesson-1").unwrap(), None);
    }

    #[test]
    fn write_then_read_returns_record() {
        let (_temp, store) = store();
        let unit = ContentUnit::new("lesson-1", "Keys", "Keep keys offline.");
        store.write(Location::Draft, &unit).unwrap();
        assert_eq!(store.read(Location::Draft, "lesson-1").unwrap(), Some(unit));
        assert!(store.contains(Location::Draft, "lesson-1").unwrap());
        assert!(!store.contains(Location::Approved, "lesson-1").unwrap());
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let (temp, store) = store();
        store
            .write(Location::Approved, &ContentUnit::new("u1", "t", "b"))
            .unwrap();
        let names: Vec<String> = std::fs::read_dir(temp.path().join("approved"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["u1.json".to_string()]);
    }

    #[test]
    fn delete_is_idempotent() {
        let (_temp, store) = store();
        store
            .write(Location::Draft, &ContentUnit::new("u1", "t", "b"))
            .unwrap();
        store.delete(Location::Draft, "u1").unwrap();
        store.delete(Location::Draft, "u1").unwrap();
        assert!(!store.contains(Location::Draft, "u1").unwrap());
    }

    #[test]
    fn list_is_sorted_and_ignores_other_files() {
        let (temp, store) = store();
        for id in ["b", "a", "c"] {
            store
                .write(Location::Draft, &ContentUnit::new(id, "t", "b"))
                .unwrap();
        }
        std::fs::write(temp.path().join("draft/notes.txt"), "x").unwrap();
        std::fs::write(temp.path().join("draft/.d.json.tmp"), "x").unwrap();
        assert_eq!(store.list(Location::Draft).unwrap(), vec!["a", "b", "c"]);
        assert!(store.list(Location::Approved).unwrap().is_empty());
    }

    #[test]
    fn record_missing_metadata_is_malformed() {
        let (temp, store) = store();
        std::fs::create_dir_all(temp.path().join("draft")).unwrap();
        std::fs::write(
            temp.path().join("draft/u1.json"),
            r#"{"id":"u1","title":"t","body":"b"}"#,
        )
        .unwrap();
        let err = store.read(Location::Draft, "u1").expect_err("malformed");
        assert!(matches!(err, StoreError::Malformed { ref id, .. } if id == "u1"));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let (temp, store) = store();
        std::fs::create_dir_all(temp.path().join("draft")).unwrap();
        std::fs::write(temp.path().join("draft/u1.json"), "{not json").unwrap();
        let err = store.read(Location::Draft, "u1").expect_err("malformed");
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn mismatched_id_is_malformed() {
        let (temp, store) = store();
        let unit = ContentUnit::new("other", "t", "b");
        std::fs::create_dir_all(temp.path().join("draft")).unwrap();
        std::fs::write(
            temp.path().join("draft/u1.json"),
            serde_json::to_string(&unit).unwrap(),
        )
        .unwrap();
        let err = store.read(Location::Draft, "u1").expect_err("malformed");
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let (_temp, store) = store();
        let err = store
            .write(Location::Draft, &ContentUnit::new("../escape", "t", "b"))
            .expect_err("invalid id");
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
