//! Text clean-up applied to every string field before it is stored.

/// Strip control characters, trim, and cap at `max_chars` characters.
pub fn sanitize_text(raw: &str, max_chars: usize) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let trimmed = cleaned.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => trimmed[..cut].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}
