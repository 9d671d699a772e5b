use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or did not match the expected shape.
    #[error("cannot load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Every gate threshold must be set before a run; nothing is defaulted.
    #[error("[{section}] is incomplete; set {missing} in config.toml, QUILL_ env or CLI flags")]
    NotConfigured { section: String, missing: String },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
