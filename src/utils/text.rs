/// Single-line, length-bounded rendering of user or model text for log fields.
#[must_use]
pub fn log_preview(s: &str, max_chars: usize) -> String {
    let flattened: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let flattened = flattened.trim();

    match flattened.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", flattened[..idx].trim_end()),
        None => flattened.to_string(),
    }
}
