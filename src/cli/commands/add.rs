//! Add Command
//!
//! Record today's journal entry.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::types::{CreateEntryRequest, Result};

pub async fn run(text: String, habits: Vec<String>, format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let ingestor = ctx.ingestor();

    let outcome = ingestor
        .ingest_with_outcome(CreateEntryRequest::new(text, habits))
        .await?;
    let entry = outcome.entry;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let output = Output::new();
    output.success(&format!("Saved entry for {}", entry.date));
    output.entry(&entry);

    if outcome.used_fallback {
        output.warning("Mood analysis was unavailable; a neutral score was recorded.");
    }

    Ok(())
}
