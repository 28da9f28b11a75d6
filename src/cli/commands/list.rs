//! List Command
//!
//! Print every entry, oldest first.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::storage::EntryRepository;
use crate::types::Result;

pub async fn run(format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let entries = ctx.store().list_all().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let output = Output::new();
    if entries.is_empty() {
        output.info("No entries yet. Add one with 'moodecho add'.");
        return Ok(());
    }

    output.header(&format!("Journal ({} entries)", entries.len()));
    for entry in &entries {
        println!();
        output.entry(entry);
    }

    Ok(())
}
