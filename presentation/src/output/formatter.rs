//! Output formatter trait

use guide_application::RenderedReply;

/// Trait for formatting rendered replies
pub trait OutputFormatter {
    /// Format as a coloured panel
    fn format(&self, reply: &RenderedReply) -> String;

    /// Format with the panel layout but no ANSI styling
    fn format_plain(&self, reply: &RenderedReply) -> String;

    /// Format as JSON
    fn format_json(&self, reply: &RenderedReply) -> String;
}
