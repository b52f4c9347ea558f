//! Source document parsing.

mod options;
mod pdf;

pub use options::{ErrorMode, ParseOptions};
pub use pdf::PdfParser;
