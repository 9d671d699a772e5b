use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema registered under '{name}'")]
    UnknownSchema { name: String },

    /// The instance broke one or more rules of the named schema.
    #[error("{schema} rejected the record: {}", errors.join("; "))]
    Rejected {
        schema: String,
        errors: Vec<String>,
    },

    #[error("schema '{schema}' does not compile: {reason}")]
    Compile { schema: String, reason: String },
}
