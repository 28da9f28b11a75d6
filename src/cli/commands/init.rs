//! Init Command
//!
//! Initialize MoodEcho in the current directory.

use crate::cli::ui::Output;
use crate::cli::util::{create_database, data_dir};
use crate::config::ConfigLoader;
use crate::types::{JournalError, Result};

pub fn run(force: bool) -> Result<()> {
    let dir = data_dir();

    if dir.exists() && !force {
        return Err(JournalError::Config(
            "Already initialized. Use --force to re-run initialization.".to_string(),
        ));
    }

    ConfigLoader::init_project()?;

    // Global config is optional; never overwrite it from here
    if let Err(e) = ConfigLoader::init_global(false) {
        tracing::debug!("Global config init skipped: {}", e);
    }

    let config = ConfigLoader::load()?;
    create_database(&config.storage.database_path)?;

    let output = Output::new();
    output.success("Initialized MoodEcho in .moodecho/");
    println!("  Database: {}", config.storage.database_path.display());
    println!(
        "  Provider: {} ({})",
        config.analysis.provider,
        config.analysis.model_label()
    );
    println!();
    println!("Next steps:");
    println!("  1. Export GEMINI_API_KEY (or configure another provider)");
    println!("  2. Run 'moodecho add \"How was today?\" --habit run'");

    Ok(())
}
