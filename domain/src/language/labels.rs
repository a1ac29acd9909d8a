//! Section label vocabulary.
//!
//! The guide's replies are organised under four canonical sections. Each
//! section has exactly one heading string per [`Language`]; the table below is
//! the only place those strings live. Supporting another language means adding
//! one column here.

use super::Language;
use serde::{Deserialize, Serialize};

/// Canonical section of a structured reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Recommendations,
    Rationale,
    /// Follow-up questions. Bullets here become suggestions, not display text.
    NextQuestions,
}

/// `(kind, english, spanish)`
const LABELS: [(SectionKind, &str, &str); 4] = [
    (SectionKind::Summary, "Summary", "Resumen"),
    (SectionKind::Recommendations, "Recommendations", "Recomendaciones"),
    (SectionKind::Rationale, "Rationale", "Justificación"),
    (SectionKind::NextQuestions, "Next questions", "Siguientes preguntas"),
];

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Summary,
        SectionKind::Recommendations,
        SectionKind::Rationale,
        SectionKind::NextQuestions,
    ];

    /// Heading string for this section in `language`.
    pub fn label(&self, language: Language) -> &'static str {
        let (_, en, es) = LABELS[*self as usize];
        match language {
            Language::English => en,
            Language::Spanish => es,
        }
    }

    /// Look up the section whose heading in `language` is exactly `label`.
    ///
    /// Headings of the other language never match.
    pub fn from_label(label: &str, language: Language) -> Option<SectionKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label(language) == label)
    }
}
