//! Flow document rendering.

mod docx;

pub use docx::{to_docx, DOCX_MIME};
