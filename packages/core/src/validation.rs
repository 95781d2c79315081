// ABOUTME: Input validation helpers shared by the workflows
// ABOUTME: Blank-input checks and char-safe truncation for log snippets

/// True when the input has no non-whitespace characters
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(!is_blank(" 4 bed, ocean view "));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("• bullet", 1), "•");
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
