//! Error types for PDF-to-slide extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a document into slides.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to load the PDF document structure.
    #[error("PDF parsing error: {0}")]
    PdfParseError(String),

    /// The document is encrypted and cannot be read.
    #[error("Document is encrypted: {0}")]
    Encrypted(String),

    /// The request payload could not be decoded.
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
}
