//! # quill-store
//!
//! The two named storage locations (`draft`, `approved`) that content units
//! move between, plus the JSONL decision trail.
//!
//! - [`Store`]: location-addressed `read` / `write` / `delete` by unit id
//! - [`FsStore`]: `<root>/{draft,approved}/<id>.json`, atomic temp-file writes,
//!   schema-checked reads
//! - [`MemoryStore`]: in-process store with fault injection for tests and tools
//! - [`TrailWriter`]: appends routing outcomes to `<root>/trail/<run_id>.jsonl`

mod error;
mod fs;
mod memory;
mod trail;

pub use error::{StoreError, StoreOp};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use trail::TrailWriter;

use quill_core::entities::ContentUnit;
use quill_core::enums::Location;

/// Location-addressed record storage.
///
/// Implementations are expected to make `write` all-or-nothing for a single
/// record: after a failed write the previous record (or its absence) is intact.
pub trait Store {
    /// Read a record. `Ok(None)` when the id is absent at `location`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if a record exists but cannot be parsed.
    fn read(&self, location: Location, id: &str) -> Result<Option<ContentUnit>, StoreError>;

    /// Create or replace the record for `unit.id` at `location`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record could not be durably written.
    fn write(&self, location: Location, unit: &ContentUnit) -> Result<(), StoreError>;

    /// Remove the record for `id` at `location`. Removing an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if an existing record could not be removed.
    fn delete(&self, location: Location, id: &str) -> Result<(), StoreError>;

    /// Whether a record file/entry exists for `id`, without parsing it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the location cannot be inspected.
    fn contains(&self, location: Location, id: &str) -> Result<bool, StoreError>;

    /// Ids present at `location`, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the location cannot be listed.
    fn list(&self, location: Location) -> Result<Vec<String>, StoreError>;
}
