//! Status Command
//!
//! Display entry count, latest entry and provider reachability.

use crate::ai::create_provider;
use crate::cli::util::{CommandContext, is_initialized};
use crate::types::Result;

pub async fn run(format: &str) -> Result<()> {
    let json_output = format == "json";

    if !is_initialized() {
        if json_output {
            println!("{{\"status\": \"not_initialized\"}}");
        } else {
            println!("MoodEcho Status");
            println!("══════════════════════════════════════");
            println!("Not initialized. Run 'moodecho init' first.");
        }
        // Informational only
        return Ok(());
    }

    let ctx = CommandContext::load()?;
    let stats = ctx.store().stats()?;
    let analysis = &ctx.config.analysis;

    let provider_state = match create_provider(&analysis.provider_config()) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => "reachable".to_string(),
            Ok(false) => "unreachable".to_string(),
            Err(e) => format!("error: {}", e),
        },
        Err(e) => format!("not configured: {}", e),
    };

    if json_output {
        let status = serde_json::json!({
            "status": "initialized",
            "entries": stats.entry_count,
            "latest_entry": stats.latest_date,
            "database": ctx.config.storage.database_path,
            "provider": {
                "name": analysis.provider,
                "model": analysis.model_label(),
                "state": provider_state,
            }
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("MoodEcho Status");
        println!("══════════════════════════════════════");
        println!("Entries: {}", stats.entry_count);
        match stats.latest_date {
            Some(date) => println!("Latest:  {}", date),
            None => println!("Latest:  (none)"),
        }
        println!();
        println!("Analysis:");
        println!("  Provider: {} ({})", analysis.provider, analysis.model_label());
        println!("  Timeout:  {}s", analysis.timeout_secs);
        println!("  State:    {}", provider_state);
        println!();
        println!("Database: {}", ctx.config.storage.database_path.display());
    }

    Ok(())
}
