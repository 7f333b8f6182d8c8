//! `campusmatch` -- CLI binary for the college recommender.
//!
//! Provides the following subcommands:
//!
//! - `campusmatch wizard` -- Run the step-by-step preference questionnaire.
//! - `campusmatch chat` -- Open a freeform chat about the college dataset.
//! - `campusmatch data` -- Inspect the normalized dataset.

use clap::{Parser, Subcommand};

mod commands;

/// campusmatch college recommender CLI.
#[derive(Parser)]
#[command(name = "campusmatch", about = "College recommendation assistant", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the step-by-step preference questionnaire.
    Wizard(commands::wizard::WizardArgs),

    /// Open a freeform chat about the college dataset.
    Chat(commands::chat::ChatArgs),

    /// Inspect the normalized dataset.
    Data(commands::data::DataArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Wizard(args) => commands::wizard::run(args).await?,
        Commands::Chat(args) => commands::chat::run(args).await?,
        Commands::Data(args) => commands::data::run(args)?,
    }

    Ok(())
}
