//! PDF parser backend for slide extraction.
//!
//! Loads a document with `lopdf` and hands each page's text and size to the
//! core pipeline.

pub mod parser;

pub use parser::{PdfDocument, PdfParser};
