use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    root: String,
    directories: Vec<String>,
}

/// Handle `quill init`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.store
        .init()
        .with_context(|| format!("failed to initialize store at {}", ctx.root.display()))?;

    for dir in [ctx.locks_dir(), ctx.trail_dir()] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let directories = ["draft", "approved", ".locks", "trail"]
        .into_iter()
        .map(|name| ctx.root.join(name).display().to_string())
        .collect();
    tracing::info!(root = %ctx.root.display(), "store initialized");

    output(
        &InitResponse {
            root: ctx.root.display().to_string(),
            directories,
        },
        flags.format,
    )
}
