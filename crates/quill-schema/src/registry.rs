//! Central schema registry for all Quill types.
//!
//! The `SchemaRegistry` builds JSON Schemas from quill-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Registry name of the persisted content record.
pub const CONTENT_RECORD: &str = "content_record";

/// Registry name of a decision trail line.
pub const TRAIL_ENTRY: &str = "trail_entry";

/// Central store of all JSON Schemas in the Quill system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the record, trail, configuration and
    /// response schemas from quill-core.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Persisted records (2) ---
        register!(schemas, CONTENT_RECORD, quill_core::entities::ContentUnit);
        register!(schemas, TRAIL_ENTRY, quill_core::trail::TrailEntry);

        // --- Run inputs (2) ---
        register!(
            schemas,
            "gate_thresholds",
            quill_core::thresholds::GateThresholds
        );
        register!(
            schemas,
            "brand_guidelines",
            quill_core::entities::BrandGuidelines
        );

        // --- CLI response types (2) ---
        register!(schemas, "run_summary", quill_core::responses::RunSummary);
        register!(
            schemas,
            "validation_response",
            quill_core::responses::ValidationResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownSchema` for an unregistered name and
    /// `SchemaError::Rejected` with every validator message otherwise.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownSchema {
                name: name.to_string(),
            })?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Compile {
                schema: name.to_string(),
                reason: e.to_string(),
            })?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Rejected {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
