//! `campusmatch wizard` -- interactive preference questionnaire.
//!
//! Asks the fixed question sequence one step at a time, reading answers
//! from stdin. Special inputs:
//!
//! - `/skip` -- skip the current question
//! - `/restart` -- discard progress and start over
//! - `/exit` -- quit without finishing
//!
//! # Examples
//!
//! ```text
//! campusmatch wizard --data colleges.csv
//! Preferred Location (e.g., Delhi, Pune, Bangalore): Pune
//! Preferred Branch (e.g., CSE, Mechanical): /skip
//! Your 12th board marks (%): 85
//! [recommendation table]
//! ```

use std::sync::Arc;

use clap::Args;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use campusmatch_core::parser::records_table;
use campusmatch_core::{
    FlowResponse, MemorySessionStore, RecommendationEngine, Wizard, WizardFlow,
};
use campusmatch_types::{QuestionSet, Recommendation};

use super::{build_client, load_table};

/// Session key used for the local single-user questionnaire.
const SESSION_ID: &str = "cli";

/// Arguments for the `campusmatch wizard` subcommand.
#[derive(Args)]
pub struct WizardArgs {
    /// Path to the college dataset CSV.
    #[arg(short, long, default_value = "colleges.csv")]
    pub data: String,

    /// Model to use (overrides the default).
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL (overrides the default).
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the wizard command.
pub async fn run(args: WizardArgs) -> anyhow::Result<()> {
    let table = load_table(&args.data)?;
    let client = build_client(args.model.as_deref(), args.base_url.as_deref());
    let config = client.config().clone();

    info!(rows = table.len(), model = %config.chat_model, "starting questionnaire");

    let engine = RecommendationEngine::new(client.clone(), table, config);
    let wizard = Wizard::new(QuestionSet::standard(), client, engine);
    let flow = WizardFlow::new(Arc::new(MemorySessionStore::new()), wizard);

    println!("campusmatch wizard -- answer each question, or /skip, /restart, /exit");
    println!();

    let stdin = tokio::io::stdin();
    let mut reader = tokio::io::BufReader::new(stdin).lines();

    let mut response = flow.current(SESSION_ID)?;

    loop {
        let step = match &response {
            FlowResponse::Question { step, message } => {
                if let Some(message) = message {
                    println!("{message}");
                }
                step.clone()
            }
            FlowResponse::Finished {
                recommendation, ..
            } => {
                print_recommendation(recommendation);
                return Ok(());
            }
        };

        eprint!("[{}/{}] {}", step.step + 1, step.total, step.prompt);
        use std::io::Write;
        std::io::stderr().flush().ok();

        let line = match reader.next_line().await? {
            Some(l) => l,
            None => {
                println!();
                return Ok(());
            }
        };
        let input = line.trim();

        response = match input {
            "/exit" => return Ok(()),
            "/restart" => flow.restart(SESSION_ID)?,
            "/skip" => flow.submit(SESSION_ID, None, true).await?,
            answer => flow.submit(SESSION_ID, Some(answer), false).await?,
        };
    }
}

/// Print the final recommendation: a table for colleges, the sentinel
/// message otherwise.
fn print_recommendation(recommendation: &Recommendation) {
    println!();
    match recommendation.colleges() {
        Some(records) => println!("{}", records_table(records)),
        None => {
            if let Some(message) = recommendation.sentinel_message() {
                println!("{message}");
            }
        }
    }
}
