//! Display blocks produced by the reply parser.

use crate::language::labels::SectionKind;
use serde::{Deserialize, Serialize};

/// Visual category of a section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    Plain,
    /// Recommendations are actionable and get their own treatment.
    Highlight,
}

impl HeadingStyle {
    pub fn for_kind(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Recommendations => HeadingStyle::Highlight,
            _ => HeadingStyle::Plain,
        }
    }
}

/// One render-ready unit of a parsed reply.
///
/// A sequence of blocks preserves the top-to-bottom order of the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    SectionHeading {
        kind: SectionKind,
        style: HeadingStyle,
    },
    Paragraph {
        text: String,
    },
    BulletList {
        items: Vec<String>,
    },
    Spacer,
}

impl DisplayBlock {
    pub fn heading(kind: SectionKind) -> Self {
        DisplayBlock::SectionHeading {
            kind,
            style: HeadingStyle::for_kind(kind),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        DisplayBlock::Paragraph { text: text.into() }
    }

    pub fn bullets(items: Vec<String>) -> Self {
        DisplayBlock::BulletList { items }
    }
}

/// Output of one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReply {
    pub blocks: Vec<DisplayBlock>,
    /// Follow-up questions offered as one-click prompts.
    pub suggestions: Vec<String>,
}

impl ParsedReply {
    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.suggestions.is_empty()
    }

    /// Section kinds in the order their headings appear.
    pub fn sections(&self) -> Vec<SectionKind> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                DisplayBlock::SectionHeading { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}
