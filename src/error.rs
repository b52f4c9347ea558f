//! Error types for the reflow library.

use std::io;
use thiserror::Error;

/// Result type alias for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version marker is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Cannot open or read the source document.
    #[error("Source parse error: {0}")]
    SourceParse(String),

    /// The source document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// One embedded image is corrupt. Non-fatal at pipeline level: the
    /// reflow transfer downgrades this to a [`Warning`] and skips the asset.
    #[error("Asset decode error: {0}")]
    AssetDecode(String),

    /// Cannot serialize or write the target document.
    #[error("Target write error: {0}")]
    TargetWrite(String),

    /// A named column does not exist in a tabular sheet.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The translation service returned a coded error.
    #[error("Translation error {code}: {message}")]
    Translate { code: String, message: String },

    /// HTTP transport failure talking to an external service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::SourceParse(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::AssetDecode(err.to_string())
    }
}

/// A non-fatal problem recorded while a conversion continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Page number the problem occurred on (1-indexed).
    pub page: u32,
    /// Human-readable description.
    pub detail: String,
}

impl Warning {
    /// Create a new warning for a page.
    pub fn new(page: u32, detail: impl Into<String>) -> Self {
        Self {
            page,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}: {}", self.page, self.detail)
    }
}
