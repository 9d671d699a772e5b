use crate::cli::GlobalFlags;
use crate::cli::root_commands::TextSourceArgs;
use crate::commands::shared::input::read_text;
use crate::output::output;

/// Handle `quill score`.
pub fn handle(args: &TextSourceArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(args)?;
    output(&quill_gate::readability::analyze(&text), flags.format)
}
