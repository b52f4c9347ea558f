//! Page-level types.

use super::TextBlock;
use serde::{Deserialize, Serialize};

/// A single page in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch).
    pub width: f32,

    /// Page height in points.
    pub height: f32,

    /// Content blocks in source order.
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a text block to the page.
    pub fn add_text(&mut self, block: TextBlock) {
        self.blocks.push(Block::Text(block));
    }

    /// Add an image to the page.
    pub fn add_image(&mut self, image: ImageRef) {
        self.blocks.push(Block::Image(image));
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Text(t) => Some(t.text()),
                Block::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(1)
    }
}

/// A content block on a page: an image reference or a group of text lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A text block.
    Text(TextBlock),

    /// An embedded image.
    Image(ImageRef),
}

impl Block {
    /// Check if this block is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image(_))
    }
}

/// An embedded image: opaque payload plus an encoding tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Raw image payload.
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// How the payload is encoded.
    pub encoding: ImageEncoding,
}

impl ImageRef {
    /// Create an image reference.
    pub fn new(data: Vec<u8>, encoding: ImageEncoding) -> Self {
        Self { data, encoding }
    }

    /// Create a JPEG image reference.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new(data, ImageEncoding::Jpeg)
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Encoding of an embedded image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageEncoding {
    /// JPEG (DCT) compressed data, usable as-is by image decoders.
    Jpeg,

    /// JPEG 2000 compressed data.
    Jpeg2000,

    /// Uncompressed samples needing reconstruction from layout info.
    Raw {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Sample color space.
        color_space: RawColorSpace,
        /// Bits per component (typically 8).
        bits_per_component: u8,
    },

    /// A self-describing container format (PNG, GIF, ...) or unknown data;
    /// left to the decoder to sniff.
    Other,
}

/// Color space of raw image samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawColorSpace {
    /// 3 components per pixel.
    DeviceRgb,
    /// 1 component per pixel.
    DeviceGray,
    /// Anything else (CMYK, indexed, ICC-based, ...).
    Other(String),
}
