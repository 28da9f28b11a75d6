//! Mood analysis prompt

/// Build the single instruction sent to the model.
///
/// The journal text is embedded verbatim between double quotes.
pub fn build_analysis_prompt(journal_text: &str) -> String {
    format!(
        "Analyze this diary entry: \"{}\".\n\
         Return ONLY a valid JSON object (no markdown, no code fences) with these fields:\n\
         - \"mood_score\": an integer from 1 (worst) to 10 (best).\n\
         - \"summary\": a 1-sentence summary of the user's day.",
        journal_text
    )
}
