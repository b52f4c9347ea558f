//! Page-to-flow transfer.
//!
//! Converts a parsed [`SourceDocument`] into a [`FlowDocument`]: each page
//! contributes its images first, then one paragraph per non-empty span, and
//! every page boundary except the last becomes an explicit page break.

use image::GenericImageView;
use std::io::Cursor;

use crate::error::{Error, Result, Warning};
use crate::flow::{FlowBlock, FlowDocument, InlineImage, Run};
use crate::model::{Block, ImageEncoding, ImageRef, Page, RawColorSpace, SourceDocument};

/// EMU per inch (English Metric Units, the target's native length unit).
pub const EMU_PER_INCH: u32 = 914_400;

/// Options controlling the page-to-flow transfer.
#[derive(Debug, Clone)]
pub struct ReflowOptions {
    /// Display width for transferred images, in inches.
    pub image_width_inches: f32,

    /// Whether to carry images into the flow document.
    pub include_images: bool,
}

impl ReflowOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display width for images, in inches.
    pub fn with_image_width(mut self, inches: f32) -> Self {
        self.image_width_inches = inches;
        self
    }

    /// Enable or disable image transfer.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            image_width_inches: 6.0,
            include_images: true,
        }
    }
}

/// Transfer a source document into a flow document.
///
/// Image payloads that fail to decode are dropped and reported as warnings;
/// they never abort the transfer. Every page, including an empty one,
/// contributes a page break unless it is the last.
pub fn reflow(document: &SourceDocument, options: &ReflowOptions) -> (FlowDocument, Vec<Warning>) {
    let mut flow = FlowDocument::new();
    let mut warnings = Vec::new();
    let page_count = document.pages.len();

    for (index, page) in document.pages.iter().enumerate() {
        reflow_page(page, options, &mut flow, &mut warnings);

        if index + 1 < page_count {
            flow.push(FlowBlock::PageBreak);
        }
    }

    (flow, warnings)
}

fn reflow_page(
    page: &Page,
    options: &ReflowOptions,
    flow: &mut FlowDocument,
    warnings: &mut Vec<Warning>,
) {
    // Images first, regardless of where they sat among the text.
    if options.include_images {
        for block in &page.blocks {
            if let Block::Image(image) = block {
                match transfer_image(image, options.image_width_inches) {
                    Ok(inline) => flow.push(FlowBlock::Image(inline)),
                    Err(err) => {
                        log::warn!("page {}: {}", page.number, err);
                        warnings.push(Warning::new(page.number, err.to_string()));
                    }
                }
            }
        }
    }

    for block in &page.blocks {
        if let Block::Text(text) = block {
            for line in &text.lines {
                for span in &line.spans {
                    let trimmed = span.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let mut run = Run::new(trimmed, span.style.font_size);
                    run.bold = span.style.bold;
                    run.italic = span.style.italic;
                    run.color = span.style.color;
                    flow.push_run(run);
                }
            }
        }
    }
}

/// Decode an embedded image, re-encode it as PNG, and size it to the
/// configured display width at its native aspect ratio.
fn transfer_image(image: &ImageRef, width_inches: f32) -> Result<InlineImage> {
    let decoded = decode_image(image)?;
    let (px_width, px_height) = decoded.dimensions();
    if px_width == 0 || px_height == 0 {
        return Err(Error::AssetDecode("image has zero dimensions".to_string()));
    }

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| Error::AssetDecode(format!("failed to re-encode image: {}", e)))?;

    let width_emu = (width_inches * EMU_PER_INCH as f32).round() as u32;
    let height_emu =
        (width_emu as f64 * px_height as f64 / px_width as f64).round() as u32;

    Ok(InlineImage {
        data: png,
        width_emu,
        height_emu,
    })
}

fn decode_image(image: &ImageRef) -> Result<image::DynamicImage> {
    match &image.encoding {
        ImageEncoding::Raw {
            width,
            height,
            color_space,
            bits_per_component,
        } => decode_raw_image(&image.data, *width, *height, color_space, *bits_per_component),
        ImageEncoding::Jpeg | ImageEncoding::Jpeg2000 | ImageEncoding::Other => {
            Ok(image::load_from_memory(&image.data)?)
        }
    }
}

/// Reconstruct a raster from uncompressed samples. Only 8-bit RGB and gray
/// layouts are supported; anything else is reported for the caller to skip.
fn decode_raw_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &RawColorSpace,
    bits_per_component: u8,
) -> Result<image::DynamicImage> {
    if bits_per_component != 8 {
        return Err(Error::AssetDecode(format!(
            "unsupported raw image depth: {} bits per component",
            bits_per_component
        )));
    }

    match color_space {
        RawColorSpace::DeviceRgb => {
            let expected = (width as usize) * (height as usize) * 3;
            if data.len() < expected {
                return Err(Error::AssetDecode(format!(
                    "raw RGB image data too short: {} < {}",
                    data.len(),
                    expected
                )));
            }
            image::RgbImage::from_raw(width, height, data[..expected].to_vec())
                .map(image::DynamicImage::ImageRgb8)
                .ok_or_else(|| Error::AssetDecode("invalid raw RGB image layout".to_string()))
        }
        RawColorSpace::DeviceGray => {
            let expected = (width as usize) * (height as usize);
            if data.len() < expected {
                return Err(Error::AssetDecode(format!(
                    "raw gray image data too short: {} < {}",
                    data.len(),
                    expected
                )));
            }
            image::GrayImage::from_raw(width, height, data[..expected].to_vec())
                .map(image::DynamicImage::ImageLuma8)
                .ok_or_else(|| Error::AssetDecode("invalid raw gray image layout".to_string()))
        }
        RawColorSpace::Other(name) => Err(Error::AssetDecode(format!(
            "unsupported raw image color space: {}",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Rgb, Span, SpanStyle, TextBlock};

    fn text_page(number: u32, spans: Vec<Span>) -> Page {
        let mut page = Page::letter(number);
        let mut block = TextBlock::new();
        block.add_line(Line::from_spans(spans));
        page.add_text(block);
        page
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_page_break_count() {
        let mut doc = SourceDocument::new();
        for n in 1..=3 {
            doc.add_page(text_page(n, vec![Span::new("x", SpanStyle::default())]));
        }

        let (flow, warnings) = reflow(&doc, &ReflowOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(flow.page_break_count(), 2);
        assert_eq!(flow.paragraph_count(), 3);
    }

    #[test]
    fn test_empty_pages_still_break() {
        let mut doc = SourceDocument::new();
        doc.add_page(Page::letter(1));
        doc.add_page(Page::letter(2));

        let (flow, _) = reflow(&doc, &ReflowOptions::default());
        assert_eq!(flow.page_break_count(), 1);
        assert_eq!(flow.paragraph_count(), 0);
    }

    #[test]
    fn test_single_page_no_break() {
        let mut doc = SourceDocument::new();
        doc.add_page(text_page(1, vec![Span::new("only", SpanStyle::default())]));

        let (flow, _) = reflow(&doc, &ReflowOptions::default());
        assert_eq!(flow.page_break_count(), 0);
    }

    #[test]
    fn test_style_carried_through() {
        let mut style = SpanStyle::from_font("Helvetica-Bold", 18.0);
        style.color = Some(Rgb(255, 0, 0));
        let mut doc = SourceDocument::new();
        doc.add_page(text_page(1, vec![Span::new("  Title  ", style)]));

        let (flow, _) = reflow(&doc, &ReflowOptions::default());
        let runs: Vec<_> = flow.runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Title");
        assert_eq!(runs[0].font_size, 18.0);
        assert!(runs[0].bold);
        assert!(!runs[0].italic);
        assert_eq!(runs[0].color, Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn test_whitespace_spans_skipped() {
        let spans = vec![
            Span::new("   ", SpanStyle::default()),
            Span::new("kept", SpanStyle::default()),
            Span::new("\t\n", SpanStyle::default()),
        ];
        let mut doc = SourceDocument::new();
        doc.add_page(text_page(1, spans));

        let (flow, _) = reflow(&doc, &ReflowOptions::default());
        assert_eq!(flow.paragraph_count(), 1);
        assert_eq!(flow.plain_text(), "kept");
    }

    #[test]
    fn test_images_come_before_text() {
        let mut page = text_page(1, vec![Span::new("after", SpanStyle::default())]);
        // Image added after the text block; it must still lead the page.
        page.add_image(ImageRef::new(png_bytes(4, 2), ImageEncoding::Other));

        let mut doc = SourceDocument::new();
        doc.add_page(page);

        let (flow, warnings) = reflow(&doc, &ReflowOptions::default());
        assert!(warnings.is_empty());
        assert!(matches!(flow.blocks[0], FlowBlock::Image(_)));
        assert!(matches!(flow.blocks[1], FlowBlock::Paragraph(_)));
    }

    #[test]
    fn test_image_sized_to_width() {
        let mut page = Page::letter(1);
        page.add_image(ImageRef::new(png_bytes(4, 2), ImageEncoding::Other));
        let mut doc = SourceDocument::new();
        doc.add_page(page);

        let (flow, _) = reflow(&doc, &ReflowOptions::default());
        match &flow.blocks[0] {
            FlowBlock::Image(img) => {
                assert_eq!(img.width_emu, 6 * EMU_PER_INCH);
                assert_eq!(img.height_emu, 3 * EMU_PER_INCH);
                // Re-encoded payload is PNG.
                assert_eq!(&img.data[..4], &[0x89, b'P', b'N', b'G']);
            }
            other => panic!("expected image block, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_image_warns_but_keeps_text() {
        let mut page = Page::letter(1);
        page.add_image(ImageRef::jpeg(vec![0x00, 0x01, 0x02]));
        let mut block = TextBlock::new();
        block.add_line(Line::from_spans(vec![Span::new(
            "survives",
            SpanStyle::default(),
        )]));
        page.add_text(block);

        let mut doc = SourceDocument::new();
        doc.add_page(page);
        doc.add_page(text_page(2, vec![Span::new("second", SpanStyle::default())]));

        let (flow, warnings) = reflow(&doc, &ReflowOptions::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].page, 1);
        assert_eq!(flow.paragraph_count(), 2);
        assert_eq!(flow.page_break_count(), 1);
    }

    #[test]
    fn test_images_disabled() {
        let mut page = Page::letter(1);
        page.add_image(ImageRef::new(png_bytes(2, 2), ImageEncoding::Other));
        let mut doc = SourceDocument::new();
        doc.add_page(page);

        let options = ReflowOptions::new().with_images(false);
        let (flow, warnings) = reflow(&doc, &options);
        assert!(warnings.is_empty());
        assert_eq!(flow.blocks.len(), 0);
    }

    #[test]
    fn test_raw_rgb_image() {
        let width = 2u32;
        let height = 2u32;
        let data = vec![255u8; (width * height * 3) as usize];
        let mut page = Page::letter(1);
        page.add_image(ImageRef::new(
            data,
            ImageEncoding::Raw {
                width,
                height,
                color_space: RawColorSpace::DeviceRgb,
                bits_per_component: 8,
            },
        ));
        let mut doc = SourceDocument::new();
        doc.add_page(page);

        let (flow, warnings) = reflow(&doc, &ReflowOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(flow.blocks.len(), 1);
    }

    #[test]
    fn test_unsupported_raw_color_space_warns() {
        let mut page = Page::letter(1);
        page.add_image(ImageRef::new(
            vec![0u8; 16],
            ImageEncoding::Raw {
                width: 2,
                height: 2,
                color_space: RawColorSpace::Other("ICCBased".to_string()),
                bits_per_component: 8,
            },
        ));
        let mut doc = SourceDocument::new();
        doc.add_page(page);

        let (flow, warnings) = reflow(&doc, &ReflowOptions::default());
        assert!(flow.blocks.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].detail.contains("ICCBased"));
    }
}
