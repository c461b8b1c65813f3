//! Draft Projector - Main Entry Point

use clap::Parser;
use draft_projector::cli::{cmd_info, cmd_interactive, cmd_options, cmd_project, Cli, Commands};
use draft_projector::projection::PlayerQuery;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the console session
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draft_projector=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Project { pick, age, position, nationality, json }) => {
            let query = PlayerQuery::new(pick, age, position, nationality);
            cmd_project(&cli.model, query, json)?;
        }
        Some(Commands::Info) => {
            cmd_info(&cli.model)?;
        }
        Some(Commands::Options) => {
            cmd_options()?;
        }
        None => {
            cmd_interactive(&cli.model)?;
        }
    }

    Ok(())
}
