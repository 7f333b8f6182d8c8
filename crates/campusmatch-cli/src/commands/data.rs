//! `campusmatch data` -- inspect the normalized dataset.
//!
//! Loads and normalizes the CSV, then prints either a summary, the
//! first rows as a table, or the full table as JSON. Useful for
//! checking that the monetary conversion and blank-fill behaved as
//! expected before pointing the recommender at a dataset.

use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use super::load_table;

/// Arguments for the `campusmatch data` subcommand.
#[derive(Args)]
pub struct DataArgs {
    /// Path to the college dataset CSV.
    #[arg(short, long, default_value = "colleges.csv")]
    pub data: String,

    /// Print the first N rows as a table.
    #[arg(long)]
    pub head: Option<usize>,

    /// Print the full normalized dataset as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the data command.
pub fn run(args: DataArgs) -> anyhow::Result<()> {
    let table = load_table(&args.data)?;

    if args.json {
        println!("{}", table.full_json()?);
        return Ok(());
    }

    if let Some(head) = args.head {
        let mut out = Table::new();
        out.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(table.columns().iter().map(String::as_str));

        for row in table.rows().iter().take(head) {
            out.add_row(table.columns().iter().map(|col| match row.get(col.as_str()) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            }));
        }
        println!("{out}");
        return Ok(());
    }

    println!("dataset: {}", args.data);
    println!("rows: {}", table.len());
    println!("columns ({}):", table.columns().len());
    for column in table.columns() {
        println!("  - {column}");
    }

    Ok(())
}
