//! # reflow
//!
//! Flow-layout document transfer library for Rust.
//!
//! This library reads paginated PDF documents and rebuilds their content as
//! flow-layout DOCX: every text span becomes a styled paragraph, embedded
//! images are re-encoded and sized for the page, and source page boundaries
//! become explicit page breaks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reflow::convert_file;
//!
//! fn main() -> reflow::Result<()> {
//!     let result = convert_file("document.pdf")?;
//!     std::fs::write("document.docx", &result.data)?;
//!
//!     for warning in &result.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style fidelity**: font size, bold, italic, and color survive the transfer
//! - **Image transfer**: embedded rasters re-encoded as PNG and sized to the page
//! - **Page mapping**: one explicit page break per source page boundary
//! - **Lenient mode**: unreadable pages can be skipped instead of failing
//! - **Tabular filters**: keyword row filtering for exported tables
//! - **Translation client**: signed requests against an external MT service

pub mod convert;
pub mod detect;
pub mod error;
pub mod flow;
pub mod model;
pub mod parser;
pub mod reflow;
pub mod render;
pub mod tabular;
pub mod translate;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, PdfToDocxConverter,
};
pub use detect::{detect_version_from_bytes, detect_version_from_path, is_pdf};
pub use error::{Error, Result, Warning};
pub use flow::{FlowBlock, FlowDocument, InlineImage, Run};
pub use model::{
    Block, ImageEncoding, ImageRef, Line, Metadata, Page, Rgb, SourceDocument, Span, SpanStyle,
    TextBlock,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use reflow::{reflow, ReflowOptions};
pub use render::{to_docx, DOCX_MIME};

use std::io::Read;
use std::path::Path;

/// Parse a PDF file and return the structured source model.
///
/// # Example
///
/// ```no_run
/// use reflow::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use reflow::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().text_only();
/// let doc = parse_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<SourceDocument> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<SourceDocument> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<SourceDocument> {
    let parser = PdfParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<SourceDocument> {
    let parser = PdfParser::from_reader(reader)?;
    parser.parse()
}

/// Convert a PDF file to DOCX with default options.
///
/// # Example
///
/// ```no_run
/// use reflow::convert_file;
///
/// let result = convert_file("document.pdf").unwrap();
/// std::fs::write("document.docx", &result.data).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    convert_file_with_options(path, &ConvertOptions::default())
}

/// Convert a PDF file to DOCX with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    PdfToDocxConverter::new().convert(path.as_ref(), options)
}

/// Convert PDF bytes to DOCX with default options.
pub fn convert_bytes(data: &[u8]) -> Result<ConvertResult> {
    convert_bytes_with_options(data, &ConvertOptions::default())
}

/// Convert PDF bytes to DOCX with custom options.
pub fn convert_bytes_with_options(data: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
    PdfToDocxConverter::new().convert_bytes(data, options)
}

/// Builder for configuring and running a conversion.
///
/// # Example
///
/// ```no_run
/// use reflow::Reflow;
///
/// let result = Reflow::new()
///     .lenient()
///     .with_image_width(4.5)
///     .convert("document.pdf")?;
/// std::fs::write("document.docx", &result.data)?;
/// # Ok::<(), reflow::Error>(())
/// ```
pub struct Reflow {
    parse_options: ParseOptions,
    reflow_options: ReflowOptions,
}

impl Reflow {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            reflow_options: ReflowOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Transfer text only, skipping images.
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self.reflow_options = self.reflow_options.with_images(false);
        self
    }

    /// Set the display width for transferred images, in inches.
    pub fn with_image_width(mut self, inches: f32) -> Self {
        self.reflow_options = self.reflow_options.with_image_width(inches);
        self
    }

    /// Convert a PDF file to DOCX.
    pub fn convert<P: AsRef<Path>>(self, path: P) -> Result<ConvertResult> {
        convert_file_with_options(path, &self.options())
    }

    /// Convert PDF bytes to DOCX.
    pub fn convert_bytes(self, data: &[u8]) -> Result<ConvertResult> {
        convert_bytes_with_options(data, &self.options())
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_parse_options(self.parse_options.clone())
            .with_reflow_options(self.reflow_options.clone())
    }
}

impl Default for Reflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_builder() {
        let builder = Reflow::new().lenient().with_image_width(4.0);
        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(builder.reflow_options.image_width_inches, 4.0);
    }

    #[test]
    fn test_reflow_builder_text_only() {
        let builder = Reflow::new().text_only();
        assert!(!builder.parse_options.extract_images);
        assert!(!builder.reflow_options.include_images);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_parse_bytes_too_short() {
        assert!(parse_bytes(b"%PDF").is_err());
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_convert_bytes_invalid() {
        assert!(convert_bytes(b"<!DOCTYPE html>").is_err());
    }

    #[test]
    fn test_detect_valid_versions() {
        assert_eq!(detect_version_from_bytes(b"%PDF-1.7\n%x").unwrap(), "1.7");
        assert_eq!(detect_version_from_bytes(b"%PDF-2.0\n%x").unwrap(), "2.0");
    }

    #[test]
    fn test_detect_invalid() {
        assert!(matches!(
            detect_version_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_version_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
    }
}
