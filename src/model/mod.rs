//! Source document model: pages, blocks, lines, styled spans, images.

mod document;
mod page;
mod span;

pub use document::{Metadata, SourceDocument};
pub use page::{Block, ImageEncoding, ImageRef, Page, RawColorSpace};
pub use span::{Line, Rgb, Span, SpanStyle, TextBlock};
