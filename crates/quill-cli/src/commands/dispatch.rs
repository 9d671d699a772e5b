use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a store-backed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::handle(ctx, flags),
        Commands::Revise(args) => commands::revise::handle(&args, ctx, flags).await,
        Commands::Validate => commands::validate::handle(ctx, flags),
        Commands::Tool { action } => commands::tool::handle(&action, ctx, flags),
        Commands::Score(_) | Commands::Annotate(_) | Commands::Schema(_) => {
            unreachable!("score/annotate/schema are pre-dispatched in main")
        }
    }
}
