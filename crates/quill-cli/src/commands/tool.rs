use anyhow::Context;
use quill_gate::tools::ToolRegistry;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ToolCommands;
use crate::commands::shared::collaborators;
use crate::context::AppContext;
use crate::output::output;

/// Handle `quill tool`.
pub fn handle(action: &ToolCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (accuracy, brand) = collaborators::from_config(&ctx.config);
    let registry = ToolRegistry::with_collaborators(accuracy, brand);

    match action {
        ToolCommands::List => output(&registry.list(), flags.format),
        ToolCommands::Call { name, input } => {
            let input: serde_json::Value =
                serde_json::from_str(input).context("--input must be valid JSON")?;
            let result = registry.call(name, input)?;
            output(&result, flags.format)
        }
    }
}
