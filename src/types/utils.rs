//! Shared string helpers.

/// Char-boundary-safe prefix of `content`, for log lines and error messages.
///
/// Appends `...` when anything was cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_input_unchanged() {
        assert_eq!(preview("calm day", 200), "calm day");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_preview_exact_length() {
        assert_eq!(preview("abcd", 4), "abcd");
    }
}
