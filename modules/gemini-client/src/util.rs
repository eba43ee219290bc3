/// Strip markdown code-fence markers from a model completion. Gemini often
/// wraps JSON output in ```json ... ``` even when asked not to.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Truncate a string to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
        assert_eq!(strip_code_blocks("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn truncates_at_char_boundaries() {
        assert_eq!(truncate_chars("Hello", 100), "Hello");
        assert_eq!(truncate_chars("Hello", 3), "Hel");
        assert_eq!(truncate_chars("Hello 世界", 7), "Hello 世");
    }
}
