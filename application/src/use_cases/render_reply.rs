//! Render Reply use case.
//!
//! Resolves the language of a received reply and parses it into display
//! blocks and suggestions. No I/O; the reply text is already complete (or a
//! stable prefix of a stream).

use crate::config::GuideParams;
use guide_domain::{
    DisplayBlock, Language, ParsedReply, ReplyBuffer, infer_from_content, parse_with,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A reply ready for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReply {
    /// Language whose heading vocabulary was used for parsing.
    pub language: Language,
    pub blocks: Vec<DisplayBlock>,
    pub suggestions: Vec<String>,
}

impl RenderedReply {
    fn new(language: Language, parsed: ParsedReply) -> Self {
        Self {
            language,
            blocks: parsed.blocks,
            suggestions: parsed.suggestions,
        }
    }

    /// True when there is nothing to show; the caller may skip the bubble.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.suggestions.is_empty()
    }
}

/// Use case for turning raw reply text into a [`RenderedReply`].
#[derive(Debug, Clone, Default)]
pub struct RenderReplyUseCase {
    params: GuideParams,
}

impl RenderReplyUseCase {
    pub fn new(params: GuideParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GuideParams {
        &self.params
    }

    /// Language to parse `raw` with.
    ///
    /// With auto-detect on, headings in the reply win over `expected`;
    /// otherwise `expected` is used as is.
    pub fn resolve_language(&self, raw: &str, expected: Language) -> Language {
        if self.params.auto_detect {
            infer_from_content(raw, expected)
        } else {
            expected
        }
    }

    /// Render a reply that was requested in the UI language.
    pub fn execute(&self, raw: &str) -> RenderedReply {
        self.render(raw, self.params.ui_language)
    }

    /// Render a reply that was requested in `expected`.
    pub fn render(&self, raw: &str, expected: Language) -> RenderedReply {
        let language = self.resolve_language(raw, expected);
        if language != expected {
            debug!(
                "Reply headings are {} while {} was expected",
                language, expected
            );
        }
        let parsed = parse_with(raw, language, &self.params.parse_options());
        RenderedReply::new(language, parsed)
    }

    /// Render the prefix collected so far from a streamed reply.
    pub fn render_partial(&self, buffer: &ReplyBuffer, expected: Language) -> RenderedReply {
        let language = self.resolve_language(buffer.text(), expected);
        RenderedReply::new(language, buffer.parse(language, &self.params.parse_options()))
    }
}
