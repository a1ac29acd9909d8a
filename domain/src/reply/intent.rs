//! Lightweight intent checks on messages and replies.
//!
//! These never look at structure, only at the lowercased text.

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "howdy",
    "good morning",
    "good afternoon",
    "good evening",
    "hola",
    "buenas",
    "buenos dias",
    "buenos días",
    "buenas tardes",
    "buenas noches",
];

const REFUSAL_PATTERNS: &[&str] = &[
    "unable to assist",
    "cannot assist",
    "can't assist",
    "cannot help",
    "can't help",
    "sorry, i am unable",
    "no puedo ayudar",
    "no puedo asist",
    "no tengo información",
];

/// True if the whole message is a greeting such as `"Hi!"` or `"Buenas tardes"`.
///
/// A greeting inside a longer question does not count.
pub fn is_greeting(message: &str) -> bool {
    let cleaned = message
        .trim()
        .trim_end_matches(['!', '.', '?', '¡', ','])
        .trim_start_matches(['¡', '¿'])
        .trim()
        .to_lowercase();

    !cleaned.is_empty() && GREETINGS.contains(&cleaned.as_str())
}

/// True if the reply reads like the model declining to answer.
pub fn looks_like_refusal(reply: &str) -> bool {
    let lowered = reply.to_lowercase();
    REFUSAL_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}
