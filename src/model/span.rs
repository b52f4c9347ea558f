//! Text-level types: blocks, lines, and styled spans.

use serde::{Deserialize, Serialize};

/// A group of text lines from one source block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines in source order.
    pub lines: Vec<Line>,
}

impl TextBlock {
    /// Create an empty text block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the block.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Get the combined text of all lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the block holds no non-empty span.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

/// A line of spans sharing one baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// Spans in source order.
    pub spans: Vec<Span>,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Add a span to the line.
    pub fn add_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Get the combined text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if the line holds no non-empty span.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The text content.
    pub text: String,

    /// Style in force when the text was shown.
    pub style: SpanStyle,
}

impl Span {
    /// Create a span with the given style.
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if the trimmed text is empty.
    pub fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Decoded style attributes of a span.
///
/// Bold and italic are plain named flags resolved once at parse time;
/// nothing downstream tests style bits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanStyle {
    /// Font size in points.
    pub font_size: f32,

    /// Bold flag.
    pub bold: bool,

    /// Italic flag.
    pub italic: bool,

    /// Fill color, if one was explicitly set.
    pub color: Option<Rgb>,

    /// Base font name (e.g., "Helvetica-Bold").
    pub font_name: String,
}

impl SpanStyle {
    /// Build a style from a base font name and size.
    ///
    /// Bold and italic are inferred from the font name, which is how
    /// paginated formats carry these attributes for standard fonts.
    pub fn from_font(font_name: impl Into<String>, font_size: f32) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");

        Self {
            font_size,
            bold,
            italic,
            color: None,
            font_name,
        }
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for SpanStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            bold: false,
            italic: false,
            color: None,
            font_name: String::new(),
        }
    }
}

/// An RGB color with 0-255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build from unit-interval components (content stream operands).
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let clamp = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(clamp(r), clamp(g), clamp(b))
    }

    /// Build from a unit-interval gray level.
    pub fn from_gray(g: f32) -> Self {
        let v = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(v, v, v)
    }

    /// Build from unit-interval CMYK components.
    pub fn from_cmyk(c: f32, m: f32, y: f32, k: f32) -> Self {
        Self::from_unit(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        )
    }

    /// Uppercase hex form without a leading '#', e.g. "FF0000".
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_font_name() {
        let style = SpanStyle::from_font("Helvetica-BoldOblique", 14.0);
        assert!(style.bold);
        assert!(style.italic);
        assert_eq!(style.font_size, 14.0);

        let plain = SpanStyle::from_font("Times-Roman", 11.0);
        assert!(!plain.bold);
        assert!(!plain.italic);
        assert!(plain.color.is_none());
    }

    #[test]
    fn test_rgb_conversions() {
        assert_eq!(Rgb::from_unit(1.0, 0.0, 0.0), Rgb(255, 0, 0));
        assert_eq!(Rgb::from_gray(0.5), Rgb(128, 128, 128));
        assert_eq!(Rgb::from_cmyk(0.0, 0.0, 0.0, 1.0), Rgb(0, 0, 0));
        assert_eq!(Rgb(255, 0, 0).to_hex(), "FF0000");
    }

    #[test]
    fn test_span_whitespace() {
        let style = SpanStyle::default();
        assert!(Span::new("   \t", style.clone()).is_whitespace());
        assert!(!Span::new(" x ", style).is_whitespace());
    }

    #[test]
    fn test_line_text() {
        let mut line = Line::new();
        line.add_span(Span::new("Hello, ", SpanStyle::default()));
        line.add_span(Span::new("world", SpanStyle::default()));
        assert_eq!(line.text(), "Hello, world");
        assert!(!line.is_empty());
    }
}
