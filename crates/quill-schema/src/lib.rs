//! # quill-schema
//!
//! JSON Schema generation, validation, and registry for Quill.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of all JSON Schemas in the system
//! - Validation of persisted content records and trail entries
//! - Schema export for external tooling (`quill schema` command)
//!
//! Record types are defined in `quill-core` with `#[derive(JsonSchema)]`.
//! Consumer crates (quill-store, quill-cli) depend on this crate for runtime
//! validation.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{CONTENT_RECORD, SchemaRegistry, TRAIL_ENTRY};
