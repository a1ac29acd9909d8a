//! Shared utility functions.

/// One-line preview of `text` for log messages.
///
/// Line breaks become `⏎` and the result is cut to at most `max_chars`
/// characters, with `...` appended when something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.trim().replace("\r\n", "⏎").replace('\n', "⏎");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{cut}...")
}
