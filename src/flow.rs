//! Target flow-document model: paragraphs of styled runs, inline images,
//! explicit page breaks.

use crate::model::Rgb;
use serde::{Deserialize, Serialize};

/// A flow document: an ordered sequence of paragraphs, inline images, and
/// page-break markers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Blocks in reading order.
    pub blocks: Vec<FlowBlock>,
}

impl FlowDocument {
    /// Create an empty flow document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, block: FlowBlock) {
        self.blocks.push(block);
    }

    /// Append a paragraph with a single run.
    pub fn push_run(&mut self, run: Run) {
        self.blocks.push(FlowBlock::Paragraph(vec![run]));
    }

    /// Number of paragraphs (text and image paragraphs both count).
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, FlowBlock::PageBreak))
            .count()
    }

    /// Number of page-break markers.
    pub fn page_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, FlowBlock::PageBreak))
            .count()
    }

    /// Iterate over all text runs in reading order.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.blocks.iter().flat_map(|b| match b {
            FlowBlock::Paragraph(runs) => runs.as_slice(),
            _ => &[],
        })
    }

    /// Get plain text content of the whole document.
    pub fn plain_text(&self) -> String {
        self.runs()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A block-level unit in the flow document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowBlock {
    /// A paragraph of styled runs.
    Paragraph(Vec<Run>),

    /// A paragraph holding a single inline image.
    Image(InlineImage),

    /// An explicit marker forcing the next paragraph onto a new page.
    PageBreak,
}

/// A styled text fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Text content.
    pub text: String,

    /// Font size in points.
    pub font_size: f32,

    /// Bold flag.
    pub bold: bool,

    /// Italic flag.
    pub italic: bool,

    /// Text color; `None` leaves the target default.
    pub color: Option<Rgb>,
}

impl Run {
    /// Create a plain run.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            italic: false,
            color: None,
        }
    }
}

/// A re-encoded inline image sized for the target page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    /// Canonical raster payload (PNG).
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// Display width in EMU (914400 per inch).
    pub width_emu: u32,

    /// Display height in EMU.
    pub height_emu: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut doc = FlowDocument::new();
        doc.push_run(Run::new("a", 12.0));
        doc.push(FlowBlock::PageBreak);
        doc.push(FlowBlock::Image(InlineImage {
            data: vec![],
            width_emu: 1,
            height_emu: 1,
        }));
        doc.push_run(Run::new("b", 12.0));

        assert_eq!(doc.paragraph_count(), 3);
        assert_eq!(doc.page_break_count(), 1);
        assert_eq!(doc.runs().count(), 2);
        assert_eq!(doc.plain_text(), "a\nb");
    }
}
