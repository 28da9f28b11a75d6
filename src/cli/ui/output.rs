use console::style;

use crate::types::Entry;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    /// One entry as a short block: date and mood, summary, habits
    pub fn entry(&self, entry: &Entry) {
        let mood = match entry.mood_score {
            Some(score) => format!("mood {}/10", score),
            None => "mood -".to_string(),
        };
        println!(
            "{}  {}",
            style(entry.date).bold(),
            style(mood).cyan()
        );

        if let Some(summary) = &entry.ai_summary {
            println!("  {}", summary);
        }

        if !entry.habit_logs.is_empty() {
            let habits: Vec<_> = entry
                .habit_logs
                .iter()
                .map(|h| h.habit_name.as_str())
                .collect();
            println!("  {} {}", style("habits:").dim(), habits.join(", "));
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
