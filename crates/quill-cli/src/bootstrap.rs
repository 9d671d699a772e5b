use std::path::Path;

use anyhow::Context;
use quill_config::QuillConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, preferring a `.env` next to `--root`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QuillConfig> {
    if let Some(root) = flags.root.as_deref() {
        let env_path = Path::new(root).join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return QuillConfig::load().context("failed to load quill configuration");
        }
    }

    QuillConfig::load_with_dotenv().context("failed to load quill configuration")
}
