//! Entity structs for Quill domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so persisted
//! records can be schema-checked before they are parsed.

mod brand;
mod content;

pub use brand::BrandGuidelines;
pub use content::{ContentMetadata, ContentUnit};
