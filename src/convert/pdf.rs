//! PDF to DOCX converter implementation.

use std::path::Path;

use crate::error::Result;
use crate::parser::PdfParser;
use crate::reflow::reflow;
use crate::render::{to_docx, DOCX_MIME};

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// Converts PDF documents into flow-layout DOCX.
#[derive(Debug, Clone, Default)]
pub struct PdfToDocxConverter {
    _private: (),
}

impl PdfToDocxConverter {
    /// Create a new converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_parsed(&self, parser: &PdfParser, options: &ConvertOptions) -> Result<ConvertResult> {
        let document = parser.parse()?;
        let metadata = document.metadata.clone();

        let (flow, warnings) = reflow(&document, &options.reflow);
        let data = to_docx(&flow)?;

        Ok(ConvertResult::new(data, DOCX_MIME, metadata).with_warnings(warnings))
    }
}

impl DocumentConverter for PdfToDocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn output_extension(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = PdfParser::open_with_options(path, options.parse.clone())?;
        self.convert_parsed(&parser, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = PdfParser::from_bytes_with_options(bytes, options.parse.clone())?;
        self.convert_parsed(&parser, options)
    }
}
