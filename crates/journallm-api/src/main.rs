//! JournaLLM command-line entry point.
//!
//! Binary name: `journallm`
//!
//! Parses CLI arguments, loads the client configuration, then dispatches to
//! the interactive chat loop or one of the one-shot commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,journallm=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "journallm", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.api_url.as_deref()).await?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Chat { range } => {
            let range = range.resolve(today, state.window_days());
            cli::chat::loop_runner::run_chat_loop(&state, range).await?;
        }

        Commands::Ask { message, range } => {
            let range = range.resolve(today, state.window_days());
            cli::ask::ask(&state, &message.join(" "), range, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
