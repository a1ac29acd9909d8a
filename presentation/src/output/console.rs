//! Console output formatter for guide replies

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use guide_application::RenderedReply;
use guide_domain::{DisplayBlock, HeadingStyle, OutputFormat, SectionKind};

/// Formats rendered replies as a panel: section headings, paragraphs,
/// bullet lists and numbered follow-up suggestions.
pub struct PanelFormatter;

impl PanelFormatter {
    /// Format the reply with colours
    pub fn format(reply: &RenderedReply) -> String {
        Self::render(reply, true)
    }

    /// Format the reply without ANSI styling
    pub fn format_plain(reply: &RenderedReply) -> String {
        Self::render(reply, false)
    }

    /// Format as JSON
    pub fn format_json(reply: &RenderedReply) -> String {
        serde_json::to_string_pretty(reply).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format with the given output format
    pub fn format_as(reply: &RenderedReply, format: OutputFormat) -> String {
        match format {
            OutputFormat::Panel => Self::format(reply),
            OutputFormat::Plain => Self::format_plain(reply),
            OutputFormat::Json => Self::format_json(reply),
        }
    }

    fn render(reply: &RenderedReply, color: bool) -> String {
        let mut output = String::new();

        for block in &reply.blocks {
            match block {
                DisplayBlock::SectionHeading { kind, style } => {
                    let title = kind.label(reply.language);
                    let title = match style {
                        HeadingStyle::Plain => paint(title, color, |t| t.cyan().bold()),
                        HeadingStyle::Highlight => paint(title, color, |t| t.yellow().bold()),
                    };
                    output.push_str(&title);
                    output.push('\n');
                }
                DisplayBlock::Paragraph { text } => {
                    output.push_str(text);
                    output.push('\n');
                }
                DisplayBlock::BulletList { items } => {
                    for item in items {
                        output.push_str(&format!("  • {}\n", item));
                    }
                }
                DisplayBlock::Spacer => output.push('\n'),
            }
        }

        if !reply.suggestions.is_empty() {
            if !output.is_empty() && !output.ends_with("\n\n") {
                output.push('\n');
            }
            let title = SectionKind::NextQuestions.label(reply.language);
            output.push_str(&paint(title, color, |t| t.green().bold()));
            output.push('\n');
            for (i, suggestion) in reply.suggestions.iter().enumerate() {
                let number = paint(&format!("[{}]", i + 1), color, |t| t.dimmed());
                output.push_str(&format!("  {} {}\n", number, suggestion));
            }
        }

        output
    }
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

impl OutputFormatter for PanelFormatter {
    fn format(&self, reply: &RenderedReply) -> String {
        Self::format(reply)
    }

    fn format_plain(&self, reply: &RenderedReply) -> String {
        Self::format_plain(reply)
    }

    fn format_json(&self, reply: &RenderedReply) -> String {
        Self::format_json(reply)
    }
}
