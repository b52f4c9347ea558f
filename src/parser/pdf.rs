//! PDF structural reader built on lopdf.
//!
//! Walks each page's resource dictionary for embedded images and interprets
//! the content stream into text blocks, lines, and styled spans.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::detect_version_from_path;
use crate::error::{Error, Result};
use crate::model::{
    ImageEncoding, ImageRef, Line, Metadata, Page, RawColorSpace, Rgb, SourceDocument, Span,
    SpanStyle, TextBlock,
};

use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        detect_version_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Self::from_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Self::from_document(doc, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, options: ParseOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// Parse the document and return the structured source model.
    pub fn parse(&self) -> Result<SourceDocument> {
        let mut document = SourceDocument::new();
        document.metadata = self.extract_metadata();

        let page_ids = self.doc.get_pages();
        document.metadata.page_count = page_ids.len() as u32;

        for (page_num, page_id) in page_ids.iter() {
            match self.parse_page(*page_num, *page_id) {
                Ok(page) => document.add_page(page),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("skipping unreadable page {}: {}", page_num, e);
                    document.add_page(Page::letter(*page_num));
                }
            }
        }

        Ok(document)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get the PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract document metadata from the Info dictionary.
    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());
        metadata.encrypted = self.doc.is_encrypted();

        if let Ok(info_ref) = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(|info| info.as_reference())
        {
            if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                metadata.title = get_string_from_dict(info_dict, b"Title");
                metadata.author = get_string_from_dict(info_dict, b"Author");
                metadata.subject = get_string_from_dict(info_dict, b"Subject");
                metadata.creator = get_string_from_dict(info_dict, b"Creator");
                metadata.producer = get_string_from_dict(info_dict, b"Producer");

                if let Some(date_str) = get_string_from_dict(info_dict, b"CreationDate") {
                    metadata.created = parse_pdf_date(&date_str);
                }
                if let Some(date_str) = get_string_from_dict(info_dict, b"ModDate") {
                    metadata.modified = parse_pdf_date(&date_str);
                }
            }
        }

        metadata
    }

    /// Parse one page: embedded images first, then text blocks, both in
    /// source order.
    fn parse_page(&self, page_num: u32, page_id: ObjectId) -> Result<Page> {
        let (width, height) = self.page_dimensions(page_id);
        let mut page = Page::new(page_num, width, height);

        if self.options.extract_images {
            for image in self.extract_page_images(page_id) {
                page.add_image(image);
            }
        }

        for block in self.extract_page_text(page_id)? {
            page.add_text(block);
        }

        Ok(page)
    }

    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
            if let Ok(array) = page_dict.get(b"MediaBox").and_then(|m| m.as_array()) {
                if array.len() >= 4 {
                    let width = array[2].as_float().unwrap_or(612.0);
                    let height = array[3].as_float().unwrap_or(792.0);
                    return (width, height);
                }
            }
        }
        // Default to Letter size
        (612.0, 792.0)
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Enumerate image XObjects on a page in resource-dictionary order.
    fn extract_page_images(&self, page_id: ObjectId) -> Vec<ImageRef> {
        let mut images = Vec::new();

        let Ok(page_dict) = self.doc.get_dictionary(page_id) else {
            return images;
        };

        let res_dict = match page_dict.get(b"Resources") {
            Ok(Object::Reference(r)) => self.doc.get_dictionary(*r).ok(),
            Ok(Object::Dictionary(d)) => Some(d),
            _ => None,
        };
        let Some(res_dict) = res_dict else {
            return images;
        };

        let xobj_dict = match res_dict.get(b"XObject") {
            Ok(Object::Reference(r)) => self.doc.get_dictionary(*r).ok(),
            Ok(Object::Dictionary(d)) => Some(d),
            _ => None,
        };
        let Some(xobj_dict) = xobj_dict else {
            return images;
        };

        for (_name, obj) in xobj_dict.iter() {
            if let Ok(obj_ref) = obj.as_reference() {
                if let Some(image) = self.extract_image_xobject(obj_ref) {
                    images.push(image);
                }
            }
        }

        images
    }

    /// Extract one image XObject as an opaque payload plus encoding tag.
    fn extract_image_xobject(&self, obj_ref: ObjectId) -> Option<ImageRef> {
        let Ok(Object::Stream(stream)) = self.doc.get_object(obj_ref) else {
            return None;
        };
        let dict = &stream.dict;

        match dict.get(b"Subtype").ok().and_then(|s| s.as_name_str().ok()) {
            Some("Image") => {}
            _ => return None,
        }

        let width = dict
            .get(b"Width")
            .ok()
            .and_then(|w| w.as_i64().ok())
            .map(|w| w as u32);
        let height = dict
            .get(b"Height")
            .ok()
            .and_then(|h| h.as_i64().ok())
            .map(|h| h as u32);
        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|b| b.as_i64().ok())
            .unwrap_or(8) as u8;

        let filter = match dict.get(b"Filter") {
            Ok(Object::Name(n)) => String::from_utf8_lossy(n).to_string(),
            Ok(Object::Array(arr)) => arr
                .last()
                .and_then(|o| o.as_name_str().ok())
                .unwrap_or("")
                .to_string(),
            _ => String::new(),
        };

        let image = match filter.as_str() {
            "DCTDecode" => ImageRef::new(stream.content.clone(), ImageEncoding::Jpeg),
            "JPXDecode" => ImageRef::new(stream.content.clone(), ImageEncoding::Jpeg2000),
            "FlateDecode" | "LZWDecode" | "" => {
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                match (width, height) {
                    (Some(w), Some(h)) => ImageRef::new(
                        data,
                        ImageEncoding::Raw {
                            width: w,
                            height: h,
                            color_space: self.image_color_space(dict),
                            bits_per_component: bits,
                        },
                    ),
                    _ => ImageRef::new(data, ImageEncoding::Other),
                }
            }
            _ => ImageRef::new(stream.content.clone(), ImageEncoding::Other),
        };

        Some(image)
    }

    fn image_color_space(&self, dict: &lopdf::Dictionary) -> RawColorSpace {
        let name = match dict.get(b"ColorSpace") {
            Ok(Object::Name(n)) => Some(String::from_utf8_lossy(n).to_string()),
            Ok(Object::Array(arr)) => arr
                .first()
                .and_then(|o| o.as_name_str().ok())
                .map(String::from),
            Ok(Object::Reference(r)) => self
                .doc
                .get_object(*r)
                .ok()
                .and_then(|o| o.as_name_str().ok())
                .map(String::from),
            _ => None,
        };

        match name.as_deref() {
            Some("DeviceRGB") => RawColorSpace::DeviceRgb,
            Some("DeviceGray") => RawColorSpace::DeviceGray,
            Some(other) => RawColorSpace::Other(other.to_string()),
            None => RawColorSpace::Other("unknown".to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Interpret the page content stream into text blocks.
    fn extract_page_text(&self, page_id: ObjectId) -> Result<Vec<TextBlock>> {
        // A page with no font resources can still carry images; treat the
        // missing dictionary as an empty font set.
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let content = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::SourceParse(e.to_string()))?;

        let mut interp = ContentInterpreter::new(&self.doc, &fonts);
        for op in &content.operations {
            interp.apply(op);
        }
        Ok(interp.finish())
    }

    /// Get the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::SourceParse(e.to_string()))?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            // A page with no content stream is legal; it is simply blank.
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::SourceParse(e.to_string()));
                }
                Err(Error::SourceParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::SourceParse("Invalid content stream".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Content stream interpretation
// ---------------------------------------------------------------------------

/// Text state carried across content stream operations.
#[derive(Debug, Clone, Default)]
struct TextState {
    font_resource: Vec<u8>,
    base_font: String,
    font_size: f32,
    fill_color: Option<Rgb>,
}

/// Interprets a page content stream into text blocks.
///
/// A `BT`/`ET` pair delimits one block; positioning operators start a new
/// line; text-showing operators append spans styled with the state in force.
struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,

    state: TextState,
    state_stack: Vec<TextState>,
    matrix_scale: f32,

    in_text_block: bool,
    blocks: Vec<TextBlock>,
    current_block: TextBlock,
    current_line: Line,
}

impl<'a> ContentInterpreter<'a> {
    fn new(
        doc: &'a LopdfDocument,
        fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
    ) -> Self {
        Self {
            doc,
            fonts,
            state: TextState {
                font_size: 12.0,
                ..Default::default()
            },
            state_stack: Vec::new(),
            matrix_scale: 1.0,
            in_text_block: false,
            blocks: Vec::new(),
            current_block: TextBlock::new(),
            current_line: Line::new(),
        }
    }

    fn apply(&mut self, op: &lopdf::content::Operation) {
        match op.operator.as_str() {
            "BT" => {
                self.in_text_block = true;
                self.matrix_scale = 1.0;
            }
            "ET" => {
                self.flush_block();
                self.in_text_block = false;
            }
            "q" => self.state_stack.push(self.state.clone()),
            "Q" => {
                if let Some(saved) = self.state_stack.pop() {
                    self.state = saved;
                }
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        self.state.font_resource = font_name.clone();
                        self.state.base_font = self.base_font_name(font_name);
                    }
                    self.state.font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let b = get_number(&op.operands[1]).unwrap_or(0.0);
                    let d = get_number(&op.operands[3]).unwrap_or(1.0);
                    self.matrix_scale = (b * b + d * d).sqrt();
                    self.flush_line();
                }
            }
            "Td" | "TD" | "T*" => self.flush_line(),
            "rg" => {
                if op.operands.len() >= 3 {
                    self.state.fill_color = Some(Rgb::from_unit(
                        get_number(&op.operands[0]).unwrap_or(0.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                    ));
                }
            }
            "g" => {
                if let Some(v) = op.operands.first().and_then(get_number) {
                    self.state.fill_color = Some(Rgb::from_gray(v));
                }
            }
            "k" => {
                if op.operands.len() >= 4 {
                    self.state.fill_color = Some(Rgb::from_cmyk(
                        get_number(&op.operands[0]).unwrap_or(0.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(0.0),
                    ));
                }
            }
            "sc" | "scn" => {
                let nums: Vec<f32> = op.operands.iter().filter_map(get_number).collect();
                match nums.len() {
                    1 => self.state.fill_color = Some(Rgb::from_gray(nums[0])),
                    3 => {
                        self.state.fill_color =
                            Some(Rgb::from_unit(nums[0], nums[1], nums[2]))
                    }
                    4 => {
                        self.state.fill_color =
                            Some(Rgb::from_cmyk(nums[0], nums[1], nums[2], nums[3]))
                    }
                    _ => {}
                }
            }
            "Tj" => {
                if self.in_text_block {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        let text = self.decode_text(bytes);
                        self.push_span(text);
                    }
                }
            }
            "TJ" => {
                if self.in_text_block {
                    if let Some(Object::Array(arr)) = op.operands.first() {
                        let text = self.decode_positioned_array(arr);
                        self.push_span(text);
                    }
                }
            }
            "'" | "\"" => {
                self.flush_line();
                if self.in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = self.decode_text(bytes);
                        self.push_span(text);
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<TextBlock> {
        self.flush_block();
        self.blocks
    }

    fn flush_line(&mut self) {
        if !self.current_line.spans.is_empty() {
            let line = std::mem::take(&mut self.current_line);
            self.current_block.add_line(line);
        }
    }

    fn flush_block(&mut self) {
        self.flush_line();
        if !self.current_block.lines.is_empty() {
            let block = std::mem::take(&mut self.current_block);
            self.blocks.push(block);
        }
    }

    fn push_span(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let effective_size = self.state.font_size * self.matrix_scale;
        let mut style = SpanStyle::from_font(self.state.base_font.clone(), effective_size);
        style.color = self.state.fill_color;
        self.current_line.add_span(Span::new(text, style));
    }

    fn base_font_name(&self, resource_name: &[u8]) -> String {
        self.fonts
            .get(resource_name)
            .and_then(|f| f.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(resource_name).to_string())
    }

    /// Decode text bytes using the current font's encoding, with a simple
    /// fallback for fonts without one.
    fn decode_text(&self, bytes: &[u8]) -> String {
        if let Some(font_dict) = self.fonts.get(&self.state.font_resource) {
            if let Ok(enc) = font_dict.get_font_encoding(self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Decode a TJ positioned array. Large negative adjustments (in 1/1000
    /// text space units) act as word spaces.
    fn decode_positioned_array(&self, arr: &[Object]) -> String {
        const SPACE_THRESHOLD: f32 = 200.0;

        let mut combined = String::new();
        for item in arr {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode_text(bytes)),
                Object::Integer(n) => {
                    if -(*n as f32) > SPACE_THRESHOLD && !combined.ends_with(' ') {
                        combined.push(' ');
                    }
                }
                Object::Real(n) => {
                    if -n > SPACE_THRESHOLD && !combined.ends_with(' ') {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSS...).
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:")?;

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use lopdf::content::Operation;
    use lopdf::StringFormat;

    fn interpret(ops: Vec<Operation>) -> Vec<TextBlock> {
        let doc = LopdfDocument::with_version("1.7");
        let fonts = BTreeMap::new();
        let mut interp = ContentInterpreter::new(&doc, &fonts);
        for op in &ops {
            interp.apply(op);
        }
        interp.finish()
    }

    fn set_font(name: &str, size: i64) -> Operation {
        Operation::new(
            "Tf",
            vec![
                Object::Name(name.as_bytes().to_vec()),
                Object::Integer(size),
            ],
        )
    }

    fn show(text: &str) -> Operation {
        Operation::new(
            "Tj",
            vec![Object::String(
                text.as_bytes().to_vec(),
                StringFormat::Literal,
            )],
        )
    }

    fn literal(text: &str) -> Object {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    }

    fn all_spans(blocks: &[TextBlock]) -> Vec<&Span> {
        blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
            .collect()
    }

    #[test]
    fn test_interpreter_tracks_fill_colors() {
        let blocks = interpret(vec![
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            Operation::new(
                "rg",
                vec![Object::Real(1.0), Object::Integer(0), Object::Integer(0)],
            ),
            show("rgb red"),
            Operation::new("T*", vec![]),
            Operation::new("g", vec![Object::Real(0.5)]),
            show("mid gray"),
            Operation::new("T*", vec![]),
            Operation::new(
                "k",
                vec![
                    Object::Integer(0),
                    Object::Real(1.0),
                    Object::Real(1.0),
                    Object::Integer(0),
                ],
            ),
            show("cmyk red"),
            Operation::new("ET", vec![]),
        ]);

        let spans = all_spans(&blocks);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.color, Some(Rgb(255, 0, 0)));
        assert_eq!(spans[1].style.color, Some(Rgb(128, 128, 128)));
        assert_eq!(spans[2].style.color, Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn test_interpreter_scn_arity() {
        let blocks = interpret(vec![
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            Operation::new("scn", vec![Object::Integer(0)]),
            show("gray black"),
            Operation::new("T*", vec![]),
            Operation::new(
                "sc",
                vec![Object::Integer(0), Object::Integer(0), Object::Real(1.0)],
            ),
            show("rgb blue"),
            Operation::new("T*", vec![]),
            Operation::new(
                "scn",
                vec![
                    Object::Real(1.0),
                    Object::Integer(0),
                    Object::Real(1.0),
                    Object::Integer(0),
                ],
            ),
            show("cmyk green"),
            Operation::new("ET", vec![]),
        ]);

        let spans = all_spans(&blocks);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.color, Some(Rgb(0, 0, 0)));
        assert_eq!(spans[1].style.color, Some(Rgb(0, 0, 255)));
        assert_eq!(spans[2].style.color, Some(Rgb(0, 255, 0)));
    }

    #[test]
    fn test_interpreter_tm_scales_font_size() {
        let blocks = interpret(vec![
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            Operation::new(
                "Tm",
                vec![
                    Object::Integer(2),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(2),
                    Object::Integer(100),
                    Object::Integer(700),
                ],
            ),
            show("scaled"),
            Operation::new("ET", vec![]),
            // A fresh BT resets the matrix scale.
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            show("plain"),
            Operation::new("ET", vec![]),
        ]);

        let spans = all_spans(&blocks);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style.font_size, 24.0);
        assert_eq!(spans[1].style.font_size, 12.0);
    }

    #[test]
    fn test_interpreter_q_restores_state() {
        let blocks = interpret(vec![
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            Operation::new(
                "rg",
                vec![Object::Real(1.0), Object::Integer(0), Object::Integer(0)],
            ),
            Operation::new("q", vec![]),
            set_font("F1", 8),
            Operation::new(
                "rg",
                vec![Object::Integer(0), Object::Integer(0), Object::Real(1.0)],
            ),
            show("inner"),
            Operation::new("Q", vec![]),
            show("outer"),
            Operation::new("ET", vec![]),
        ]);

        let spans = all_spans(&blocks);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style.color, Some(Rgb(0, 0, 255)));
        assert_eq!(spans[0].style.font_size, 8.0);
        assert_eq!(spans[1].style.color, Some(Rgb(255, 0, 0)));
        assert_eq!(spans[1].style.font_size, 12.0);
    }

    #[test]
    fn test_interpreter_quote_operators_start_lines() {
        let blocks = interpret(vec![
            Operation::new("BT", vec![]),
            set_font("F1", 12),
            show("first"),
            Operation::new("'", vec![literal("second")]),
            Operation::new(
                "\"",
                vec![Object::Integer(0), Object::Integer(0), literal("third")],
            ),
            Operation::new("ET", vec![]),
        ]);

        assert_eq!(blocks.len(), 1);
        let lines = &blocks[0].lines;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
        assert_eq!(lines[2].text(), "third");
    }

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
    }

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_get_number() {
        assert_eq!(get_number(&Object::Integer(42)), Some(42.0));
        assert_eq!(get_number(&Object::Real(3.5)), Some(3.5));
        assert_eq!(get_number(&Object::Null), None);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(PdfParser::from_bytes(b"not a pdf").is_err());
        assert!(PdfParser::from_bytes(b"").is_err());
    }
}
