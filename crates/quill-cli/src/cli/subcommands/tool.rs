use clap::Subcommand;

/// Tool-call surface commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ToolCommands {
    /// List tools with their input schemas.
    List,
    /// Invoke a tool with a JSON input object.
    Call {
        /// Tool name (see `quill tool list`).
        name: String,
        /// Input as a JSON object.
        #[arg(long, default_value = "{}")]
        input: String,
    },
}
