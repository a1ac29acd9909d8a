//! Structured reply parsing.
//!
//! Turns one assistant reply into an ordered list of [`DisplayBlock`]s plus
//! the follow-up suggestions found under the "next questions" section.
//!
//! The reply format is a convention the model is asked to follow, not a
//! schema: headings may be missing, reworded, or in the wrong language.
//! Parsing never fails. Anything that is not recognised becomes a paragraph.
//!
//! # Recognised lines
//!
//! | Line | Result |
//! |------|--------|
//! | blank | [`DisplayBlock::Spacer`] |
//! | `<Label>: rest` with a known label | heading (+ paragraph for `rest`), sets the section |
//! | `- item` / `• item` (run) | one [`DisplayBlock::BulletList`], or suggestions under next questions |
//! | anything else | [`DisplayBlock::Paragraph`] |

use super::block::{DisplayBlock, ParsedReply};
use super::cleanup::clean_reply;
use crate::language::Language;
use crate::language::labels::SectionKind;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Number of follow-up suggestions offered per reply.
pub const DEFAULT_SUGGESTION_CAP: usize = 2;

/// `<letters and spaces>: <rest>`
static LABELED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\p{L} ]+):\s*(.*)$").expect("labeled line pattern is valid")
});

const BULLET_MARKERS: [&str; 2] = ["- ", "• "];

/// Tunables for [`parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of suggestions returned.
    pub suggestion_cap: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            suggestion_cap: DEFAULT_SUGGESTION_CAP,
        }
    }
}

/// Parse a reply written in `language` with the default options.
///
/// # Examples
///
/// ```
/// use guide_domain::reply::parser::parse;
/// use guide_domain::{DisplayBlock, Language};
///
/// let parsed = parse("- one\n- two\nplain", Language::English);
/// assert_eq!(
///     parsed.blocks,
///     vec![
///         DisplayBlock::bullets(vec!["one".into(), "two".into()]),
///         DisplayBlock::paragraph("plain"),
///     ]
/// );
/// assert!(parsed.suggestions.is_empty());
/// ```
pub fn parse(text: &str, language: Language) -> ParsedReply {
    parse_with(text, language, &ParseOptions::default())
}

/// Parse a reply written in `language`.
///
/// Only headings of `language` are recognised; a heading from the other
/// language is kept as an ordinary paragraph.
pub fn parse_with(text: &str, language: Language, options: &ParseOptions) -> ParsedReply {
    let cleaned = clean_reply(text);
    if cleaned.is_empty() {
        return ParsedReply::default();
    }

    let lines: Vec<&str> = cleaned.split('\n').collect();
    let mut blocks = Vec::new();
    let mut questions = Vec::new();
    let mut section: Option<SectionKind> = None;
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor].trim();

        if line.is_empty() {
            blocks.push(DisplayBlock::Spacer);
            cursor += 1;
            continue;
        }

        if let Some((kind, rest)) = match_section_label(line, language) {
            section = Some(kind);
            if kind != SectionKind::NextQuestions {
                blocks.push(DisplayBlock::heading(kind));
                if !rest.is_empty() {
                    blocks.push(DisplayBlock::paragraph(rest));
                }
            }
            cursor += 1;
            continue;
        }

        if bullet_item(line).is_some() {
            let mut items = Vec::new();
            while let Some(item) = lines.get(cursor).and_then(|l| bullet_item(l)) {
                items.push(item.to_string());
                cursor += 1;
            }

            if section == Some(SectionKind::NextQuestions) {
                questions.extend(items.into_iter().filter(|item| !item.is_empty()));
            } else {
                blocks.push(DisplayBlock::bullets(items));
            }
            continue;
        }

        blocks.push(DisplayBlock::paragraph(line));
        cursor += 1;
    }

    if blocks.is_empty() {
        blocks.push(DisplayBlock::paragraph(cleaned.as_str()));
    }

    ParsedReply {
        blocks,
        suggestions: dedup_capped(questions, options.suggestion_cap),
    }
}

/// Match `<label>: <rest>` against the section vocabulary of `language`.
fn match_section_label(line: &str, language: Language) -> Option<(SectionKind, &str)> {
    let captures = LABELED_LINE.captures(line)?;
    let label = captures.get(1)?.as_str().trim();
    let kind = SectionKind::from_label(label, language)?;
    let rest = captures.get(2).map_or("", |m| m.as_str().trim());
    Some((kind, rest))
}

/// Item text of a bullet line, without its marker.
///
/// A marker alone on its line (`"- "`, or `"-"` once trimmed) is an empty item.
fn bullet_item(line: &str) -> Option<&str> {
    let line = line.trim();
    BULLET_MARKERS.iter().find_map(|marker| {
        if line == marker.trim_end() {
            Some("")
        } else {
            line.strip_prefix(*marker).map(str::trim)
        }
    })
}

/// Drop repeated items (first occurrence wins) and keep at most `cap`.
fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::block::HeadingStyle;

    fn p(text: &str) -> DisplayBlock {
        DisplayBlock::paragraph(text)
    }

    fn list(items: &[&str]) -> DisplayBlock {
        DisplayBlock::bullets(items.iter().map(|s| s.to_string()).collect())
    }

    // ==================== Empty input ====================

    #[test]
    fn test_empty_input_yields_nothing() {
        for language in Language::ALL {
            assert_eq!(parse("", language), ParsedReply::default());
            assert_eq!(parse("  \n  ", language), ParsedReply::default());
        }
    }

    #[test]
    fn test_only_artifacts_yields_nothing() {
        let parsed = parse("Action: lookup()\n\n", Language::English);
        assert!(parsed.is_empty());
    }

    // ==================== Plain text ====================

    #[test]
    fn test_plain_lines_keep_order() {
        let parsed = parse("first\nsecond\nthird", Language::English);
        assert_eq!(parsed.blocks, vec![p("first"), p("second"), p("third")]);
    }

    #[test]
    fn test_blank_line_becomes_spacer() {
        let parsed = parse("one\n\ntwo", Language::English);
        assert_eq!(parsed.blocks, vec![p("one"), DisplayBlock::Spacer, p("two")]);
    }

    #[test]
    fn test_unknown_label_is_paragraph() {
        let parsed = parse("Tip: charge the controller", Language::English);
        assert_eq!(parsed.blocks, vec![p("Tip: charge the controller")]);
    }

    // ==================== Sections ====================

    #[test]
    fn test_full_english_reply() {
        let reply = "Summary:\n\
                     - The Xbox Adaptive Controller supports external switches.\n\
                     \n\
                     Recommendations:\n\
                     - Start with two large buttons.\n\
                     - Map jump to a foot pedal.\n\
                     \n\
                     Next questions:\n\
                     - Which games does your player enjoy?\n\
                     - Do they have more mobility in hands or feet?";

        let parsed = parse(reply, Language::English);

        assert_eq!(
            parsed.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                list(&["The Xbox Adaptive Controller supports external switches."]),
                DisplayBlock::Spacer,
                DisplayBlock::heading(SectionKind::Recommendations),
                list(&["Start with two large buttons.", "Map jump to a foot pedal."]),
                DisplayBlock::Spacer,
            ]
        );
        assert_eq!(
            parsed.suggestions,
            vec![
                "Which games does your player enjoy?",
                "Do they have more mobility in hands or feet?"
            ]
        );
    }

    #[test]
    fn test_full_spanish_reply() {
        let reply = "Resumen:\n- Punto clave.\nRecomendaciones:\n- Usa un pedal.\n\
                     Justificación: Reduce la fatiga.\nSiguientes preguntas:\n\
                     - ¿Qué consola usas?\n- ¿Qué juegos prefieres?";

        let parsed = parse(reply, Language::Spanish);

        assert_eq!(
            parsed.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                list(&["Punto clave."]),
                DisplayBlock::heading(SectionKind::Recommendations),
                list(&["Usa un pedal."]),
                DisplayBlock::heading(SectionKind::Rationale),
                p("Reduce la fatiga."),
            ]
        );
        assert_eq!(
            parsed.suggestions,
            vec!["¿Qué consola usas?", "¿Qué juegos prefieres?"]
        );
    }

    #[test]
    fn test_inline_text_after_heading_becomes_paragraph() {
        let parsed = parse("Summary: Use a flex controller.", Language::English);
        assert_eq!(
            parsed.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                p("Use a flex controller.")
            ]
        );
    }

    #[test]
    fn test_recommendations_heading_is_highlighted() {
        let parsed = parse("Recommendations:\n- a", Language::English);
        assert_eq!(
            parsed.blocks[0],
            DisplayBlock::SectionHeading {
                kind: SectionKind::Recommendations,
                style: HeadingStyle::Highlight,
            }
        );
    }

    #[test]
    fn test_heading_of_other_language_is_paragraph() {
        let parsed = parse("Summary: x", Language::Spanish);
        assert_eq!(parsed.blocks, vec![p("Summary: x")]);

        let parsed = parse("Resumen: x", Language::English);
        assert_eq!(parsed.blocks, vec![p("Resumen: x")]);
    }

    #[test]
    fn test_bold_heading_is_recognised() {
        let parsed = parse("**Summary:** short", Language::English);
        assert_eq!(
            parsed.blocks,
            vec![DisplayBlock::heading(SectionKind::Summary), p("short")]
        );
    }

    #[test]
    fn test_section_context_persists_until_next_label() {
        let reply = "Next questions:\nSome prose\n- Q1\nSummary:\n- not a question";
        let parsed = parse(reply, Language::English);
        assert_eq!(
            parsed.blocks,
            vec![
                p("Some prose"),
                DisplayBlock::heading(SectionKind::Summary),
                list(&["not a question"]),
            ]
        );
        assert_eq!(parsed.suggestions, vec!["Q1"]);
    }

    // ==================== Next questions ====================

    #[test]
    fn test_next_questions_heading_is_suppressed_in_both_languages() {
        let cases = [
            (Language::English, "Intro\nNext questions: ignored\n- Q?"),
            (Language::Spanish, "Intro\nSiguientes preguntas: ignorado\n- ¿P?"),
        ];
        for (language, reply) in cases {
            let parsed = parse(reply, language);
            assert_eq!(parsed.blocks, vec![p("Intro")], "{language}");
            assert_eq!(parsed.suggestions.len(), 1);
        }
    }

    #[test]
    fn test_suggestions_are_deduplicated_and_capped() {
        let reply = "Summary: s\nNext questions:\n- A\n- B\n- A\n- C";
        let parsed = parse(reply, Language::English);
        assert_eq!(parsed.suggestions, vec!["A", "B"]);
    }

    #[test]
    fn test_suggestion_cap_is_configurable() {
        let reply = "Summary: s\nNext questions:\n- A\n- B\n- A\n- C";
        let options = ParseOptions { suggestion_cap: 5 };
        let parsed = parse_with(reply, Language::English, &options);
        assert_eq!(parsed.suggestions, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_question_bullets_are_skipped() {
        let reply = "Summary: s\nNext questions:\n- \n- Real question";
        let parsed = parse(reply, Language::English);
        assert_eq!(parsed.suggestions, vec!["Real question"]);
        assert_eq!(
            parsed.blocks,
            vec![DisplayBlock::heading(SectionKind::Summary), p("s")]
        );
    }

    #[test]
    fn test_bare_marker_is_an_empty_bullet_anywhere_in_a_run() {
        let parsed = parse("- \n- a", Language::English);
        assert_eq!(parsed.blocks, vec![list(&["", "a"])]);

        let parsed = parse("- a\n- \nplain", Language::English);
        assert_eq!(parsed.blocks, vec![list(&["a", ""]), p("plain")]);

        let parsed = parse("Intro\n•\n• b", Language::English);
        assert_eq!(parsed.blocks, vec![p("Intro"), list(&["", "b"])]);
    }

    #[test]
    fn test_trailing_empty_question_bullet_is_hidden() {
        // The reply is trimmed, so the last "- " arrives as "-"
        let reply = "Summary: s\nNext questions:\n- Q1\n- ";
        let parsed = parse(reply, Language::English);
        assert_eq!(
            parsed.blocks,
            vec![DisplayBlock::heading(SectionKind::Summary), p("s")]
        );
        assert_eq!(parsed.suggestions, vec!["Q1"]);
    }

    #[test]
    fn test_questions_across_separate_runs_are_collected() {
        let reply = "Summary: s\nNext questions:\n- A\n\n- B";
        let parsed = parse(reply, Language::English);
        assert_eq!(parsed.suggestions, vec!["A", "B"]);
        assert_eq!(
            parsed.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                p("s"),
                DisplayBlock::Spacer
            ]
        );
    }

    #[test]
    fn test_only_next_questions_falls_back_to_whole_text() {
        let reply = "Next questions:\n- A";
        let parsed = parse(reply, Language::English);
        assert_eq!(parsed.blocks, vec![p("Next questions:\n- A")]);
        assert_eq!(parsed.suggestions, vec!["A"]);
    }

    // ==================== Bullets ====================

    #[test]
    fn test_bullet_run_is_grouped() {
        let parsed = parse("- one\n- two\nplain", Language::English);
        assert_eq!(parsed.blocks, vec![list(&["one", "two"]), p("plain")]);
        assert!(parsed.suggestions.is_empty());
    }

    #[test]
    fn test_dot_bullets_and_indentation() {
        let parsed = parse("• one\n  - two", Language::English);
        assert_eq!(parsed.blocks, vec![list(&["one", "two"])]);
    }

    #[test]
    fn test_blank_line_splits_bullet_runs() {
        let parsed = parse("- one\n\n- two", Language::English);
        assert_eq!(
            parsed.blocks,
            vec![list(&["one"]), DisplayBlock::Spacer, list(&["two"])]
        );
    }

    #[test]
    fn test_dash_without_space_is_not_a_bullet() {
        let parsed = parse("-5 degrees", Language::English);
        assert_eq!(parsed.blocks, vec![p("-5 degrees")]);
    }

    #[test]
    fn test_labeled_bullet_stays_in_list() {
        let parsed = parse("- Summary: inside a bullet", Language::English);
        assert_eq!(parsed.blocks, vec![list(&["Summary: inside a bullet"])]);
    }

    // ==================== Artifacts ====================

    #[test]
    fn test_artifacts_are_removed_before_scanning() {
        let reply = "Response: Summary: ok\r\nAction: kb_search\r\n- **bold** item";
        let parsed = parse(reply, Language::English);
        assert_eq!(
            parsed.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                p("ok"),
                list(&["bold item"]),
            ]
        );
    }

    // ==================== Properties ====================

    #[test]
    fn test_total_over_odd_inputs() {
        let inputs = [
            ":",
            ": x",
            "- ",
            "•",
            "**",
            "Summary:",
            "\u{0}\u{feff}",
            "Next questions:\n\n\n",
            "ñ: ñ",
            "- a\r\n\r\n- b\r",
        ];
        for input in inputs {
            for language in Language::ALL {
                let parsed = parse(input, language);
                assert!(parsed.suggestions.len() <= DEFAULT_SUGGESTION_CAP);
            }
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let reply = "Resumen: hola\n- a\n\nSiguientes preguntas:\n- ¿b?\n- ¿c?\n- ¿d?";
        assert_eq!(
            parse(reply, Language::Spanish),
            parse(reply, Language::Spanish)
        );
    }
}
