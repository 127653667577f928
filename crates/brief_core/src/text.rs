/// Characters of extracted text shown in the upload preview.
pub const PREVIEW_CHAR_LIMIT: usize = 3_000;
/// Characters of extracted text sent to the model.
pub const PROMPT_CHAR_LIMIT: usize = 8_000;
pub const TRUNCATION_MARKER: &str = "...";

/// First `PREVIEW_CHAR_LIMIT` characters, with the marker appended only when
/// something was cut.
pub fn preview_text(text: &str) -> String {
    let head = take_chars(text, PREVIEW_CHAR_LIMIT);
    if head.len() < text.len() {
        format!("{head}{TRUNCATION_MARKER}")
    } else {
        head.to_string()
    }
}

/// First `PROMPT_CHAR_LIMIT` characters; independent of the preview cap.
pub fn prompt_excerpt(text: &str) -> &str {
    take_chars(text, PROMPT_CHAR_LIMIT)
}

// Counts Unicode scalar values, not bytes.
fn take_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
