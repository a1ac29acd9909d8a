//! Cleanup of raw model output before it is scanned.
//!
//! The generator is asked for plain text but still leaks a few artifacts:
//! tool-call directives (`Action: ...`), a `Response:` prefix, and `**bold**`
//! markup. Each step below is idempotent.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

const ACTION_PREFIX: &str = "Action:";
const RESPONSE_PREFIX: &str = "Response:";

/// Clean a raw reply. The result is trimmed and uses `\n` line breaks only.
pub fn clean_reply(raw: &str) -> String {
    let normalized = normalize_line_breaks(raw);

    let lines: Vec<&str> = normalized
        .split('\n')
        .filter(|line| !is_action_directive(line))
        .map(strip_response_label)
        .collect();

    let joined = lines.join("\n");
    BOLD.replace_all(&joined, "$1").trim().to_string()
}

fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_action_directive(line: &str) -> bool {
    line.trim_start().starts_with(ACTION_PREFIX)
}

fn strip_response_label(line: &str) -> &str {
    match line.trim_start().strip_prefix(RESPONSE_PREFIX) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
