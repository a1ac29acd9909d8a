//! Language classification for messages and replies.
//!
//! Two tiers with different precision:
//!
//! | Function | Signal | Bias |
//! |----------|--------|------|
//! | [`classify`] | Diacritics, `¿`/`¡`, Spanish domain keywords | Recall |
//! | [`infer_from_content`] | Exact section headings (`Resumen:`, `Summary:`, ...) | Precision |
//!
//! [`classify`] routes an outgoing user message. [`infer_from_content`] is for
//! replies already received, whose language may differ from the UI toggle.

use super::Language;
use super::labels::SectionKind;

/// Substrings that mark a text as Spanish.
///
/// Matched against the lowercased text; the first hit decides.
const SPANISH_HINTS: &[&str] = &[
    // Diacritics
    "á", "é", "í", "ó", "ú", "ñ", "ü",
    // Inverted punctuation
    "¿", "¡",
    // Therapy, rehabilitation and gaming vocabulary
    "terapia",
    "terapeuta",
    "rehabilitacion",
    "juego",
    "jugador",
    "videojuego",
    "consola",
    "paciente",
    "discapacidad",
    "accesibilidad",
    "control adaptativo",
    "controles adaptativos",
    "movilidad",
];

/// Classify `text` as Spanish if any Spanish hint occurs, otherwise return `fallback`.
///
/// English text that happens to contain a hint (e.g. "café") is classified
/// as Spanish.
///
/// # Examples
///
/// ```
/// use guide_domain::language::classifier::classify;
/// use guide_domain::Language;
///
/// assert_eq!(classify("¿Cómo?", Language::English), Language::Spanish);
/// assert_eq!(classify("Hello", Language::English), Language::English);
/// ```
pub fn classify(text: &str, fallback: Language) -> Language {
    let lowered = text.to_lowercase();
    if SPANISH_HINTS.iter().any(|hint| lowered.contains(hint)) {
        Language::Spanish
    } else {
        fallback
    }
}

/// Infer the language of a reply from its section headings.
///
/// Only the literal `"<label>:"` headings of each language count. Spanish
/// headings are checked first. Returns `fallback` if no heading is present.
pub fn infer_from_content(text: &str, fallback: Language) -> Language {
    [Language::Spanish, Language::English]
        .into_iter()
        .find(|&language| {
            SectionKind::ALL.iter().any(|kind| {
                let heading = format!("{}:", kind.label(language));
                text.contains(&heading)
            })
        })
        .unwrap_or(fallback)
}
