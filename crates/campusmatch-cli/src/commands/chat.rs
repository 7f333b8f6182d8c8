//! `campusmatch chat` -- freeform chat over the dataset.
//!
//! In single-message mode (`--message "..."`), sends one question and
//! prints the reply. In interactive mode (no `--message`), reads from
//! stdin in a REPL loop until `/exit` or EOF.

use clap::Args;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use campusmatch_core::ChatBot;

use super::{build_client, load_table};

/// Arguments for the `campusmatch chat` subcommand.
#[derive(Args)]
pub struct ChatArgs {
    /// Path to the college dataset CSV.
    #[arg(short, long, default_value = "colleges.csv")]
    pub data: String,

    /// Send a single message and exit (non-interactive mode).
    #[arg(short, long)]
    pub message: Option<String>,

    /// Model to use (overrides the default).
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL (overrides the default).
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the chat command.
pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    let table = load_table(&args.data)?;
    let client = build_client(args.model.as_deref(), args.base_url.as_deref());
    let config = client.config().clone();

    info!(rows = table.len(), model = %config.chat_model, "starting chat");

    let bot = ChatBot::new(client.clone(), client, table, config);

    if let Some(ref message) = args.message {
        let reply = bot.respond(message).await?;
        println!("{reply}");
        return Ok(());
    }

    println!("campusmatch chat -- ask about colleges (/exit to quit)");
    println!();

    let stdin = tokio::io::stdin();
    let mut reader = tokio::io::BufReader::new(stdin).lines();

    loop {
        eprint!("> ");
        use std::io::Write;
        std::io::stderr().flush().ok();

        let line = match reader.next_line().await? {
            Some(l) => l,
            None => break,
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "/exit" {
            break;
        }

        match bot.respond(input).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}
