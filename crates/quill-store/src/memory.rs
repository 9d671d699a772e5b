//! In-process store.
//!
//! Backs the tool-call surface and tests. Faults can be armed per
//! `(operation, location)` to exercise partial-move handling.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use quill_core::entities::ContentUnit;
use quill_core::enums::Location;
use quill_core::ids::validate_unit_id;

use crate::Store;
use crate::error::{StoreError, StoreOp};

#[derive(Default)]
struct Inner {
    records: BTreeMap<(Location, String), ContentUnit>,
    faults: HashSet<(StoreOp, Location)>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `op` at `location` fail until [`Self::clear_faults`] is called.
    pub fn fail_on(&self, op: StoreOp, location: Location) {
        self.lock().faults.insert((op, location));
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    /// Locations currently holding `id`, draft first.
    #[must_use]
    pub fn locations_of(&self, id: &str) -> Vec<Location> {
        let inner = self.lock();
        [Location::Draft, Location::Approved]
            .into_iter()
            .filter(|location| inner.records.contains_key(&(*location, id.to_string())))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_fault(
        inner: &Inner,
        op: StoreOp,
        location: Location,
        id: &str,
    ) -> Result<(), StoreError> {
        if inner.faults.contains(&(op, location)) {
            return Err(StoreError::Unavailable {
                op,
                location,
                id: id.to_string(),
                reason: "injected fault".to_string(),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn read(&self, location: Location, id: &str) -> Result<Option<ContentUnit>, StoreError> {
        validate_unit_id(id)?;
        let inner = self.lock();
        Self::check_fault(&inner, StoreOp::Read, location, id)?;
        Ok(inner.records.get(&(location, id.to_string())).cloned())
    }

    fn write(&self, location: Location, unit: &ContentUnit) -> Result<(), StoreError> {
        validate_unit_id(&unit.id)?;
        let mut inner = self.lock();
        Self::check_fault(&inner, StoreOp::Write, location, &unit.id)?;
        inner
            .records
            .insert((location, unit.id.clone()), unit.clone());
        Ok(())
    }

    fn delete(&self, location: Location, id: &str) -> Result<(), StoreError> {
        validate_unit_id(id)?;
        let mut inner = self.lock();
        Self::check_fault(&inner, StoreOp::Delete, location, id)?;
        inner.records.remove(&(location, id.to_string()));
        Ok(())
    }

    fn contains(&self, location: Location, id: &str) -> Result<bool, StoreError> {
        validate_unit_id(id)?;
        Ok(self
            .lock()
            .records
            .contains_key(&(location, id.to_string())))
    }

    fn list(&self, location: Location) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lock()
            .records
            .keys()
            .filter(|(loc, _)| *loc == location)
            .map(|(_, id)| id.clone())
            .collect())
    }
}
