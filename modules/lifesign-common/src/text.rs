/// Characters of body text kept per record.
pub const CONTENT_MAX_CHARS: usize = 300;

const ELLIPSIS: &str = "...";

/// Truncate `text` to at most `max_chars` characters, appending an ellipsis
/// marker only when truncation actually occurred.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let mut out = text[..idx].to_string();
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
