//! PDF file parser implementation.

use deck_core::{Error, PageSize, RawPage, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::io::Read;

/// Upper bound on `/Parent` hops when resolving inherited page attributes.
const MAX_PARENT_DEPTH: usize = 32;

/// Parser for PDF documents.
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PDF from a reader.
    pub fn parse<R: Read>(&self, mut reader: R, filename: &str) -> Result<Vec<RawPage>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.parse_bytes(&data, filename)
    }

    /// Parse a PDF held in memory, returning one raw page per document page.
    ///
    /// A page whose text cannot be extracted is kept with empty text.
    pub fn parse_bytes(&self, data: &[u8], filename: &str) -> Result<Vec<RawPage>> {
        Ok(self.open(data, filename)?.pages())
    }

    /// Load a PDF once so that pages and metadata can both be read from it.
    pub fn open(&self, data: &[u8], filename: &str) -> Result<PdfDocument> {
        let doc = Document::load_mem(data).map_err(|e| load_error(filename, e))?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted(format!(
                "'{}' requires a password",
                filename
            )));
        }

        Ok(PdfDocument {
            doc,
            filename: filename.to_string(),
        })
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded, readable PDF document.
pub struct PdfDocument {
    doc: Document,
    filename: String,
}

impl PdfDocument {
    /// Extract every page in page-tree order.
    pub fn pages(&self) -> Vec<RawPage> {
        let doc = &self.doc;

        // Page tree order, keyed by 1-based page number
        let page_ids = doc.get_pages();
        log::debug!("Loaded '{}': {} pages", self.filename, page_ids.len());

        let mut pages = Vec::with_capacity(page_ids.len());

        for (page_num, page_id) in page_ids {
            let text = match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!(
                        "Failed to extract text from page {} of '{}' (continuing): {}",
                        page_num,
                        self.filename,
                        e
                    );
                    String::new()
                }
            };

            let size = page_size(doc, page_id);
            if size.is_none() {
                log::debug!("Page {}: no usable MediaBox", page_num);
            }

            pages.push(RawPage {
                page_number: page_num as usize,
                text,
                size,
            });
        }

        if !pages.is_empty() && pages.iter().all(|p| p.text.trim().is_empty()) {
            log::warn!(
                "No text content extracted from '{}'. The document may be scanned \
                 or contain only images.",
                self.filename
            );
        }

        pages
    }

    /// The `/Title` entry of the document information dictionary.
    pub fn title(&self) -> Option<String> {
        let doc = &self.doc;

        doc.trailer
            .get(b"Info")
            .ok()
            .and_then(|info| doc.dereference(info).ok())
            .and_then(|(_, info)| info.as_dict().ok())
            .and_then(|info| info.get(b"Title").ok())
            .and_then(|title| title.as_str().ok())
            .map(decode_text_string)
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

/// Classify a load failure; lopdf reports failed decryption as a load error.
fn load_error(filename: &str, e: lopdf::Error) -> Error {
    let message = e.to_string();
    let lower = message.to_lowercase();

    if lower.contains("encrypt") || lower.contains("decrypt") || lower.contains("password") {
        Error::Encrypted(format!("'{}' could not be decrypted: {}", filename, message))
    } else {
        Error::PdfParseError(format!("Failed to load '{}': {}", filename, message))
    }
}

/// Resolve a page's MediaBox, following `/Parent` for inherited values.
fn page_size(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let mut dict = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(media_box) = dict.get(b"MediaBox") {
            return media_box_size(doc, media_box);
        }
        dict = parent_dictionary(doc, dict)?;
    }

    None
}

fn parent_dictionary<'a>(doc: &'a Document, dict: &Dictionary) -> Option<&'a Dictionary> {
    let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    doc.get_dictionary(parent_id).ok()
}

/// Width and height of a `[llx lly urx ury]` rectangle.
fn media_box_size(doc: &Document, media_box: &Object) -> Option<PageSize> {
    let (_, media_box) = doc.dereference(media_box).ok()?;
    let coords = media_box.as_array().ok()?;
    if coords.len() != 4 {
        return None;
    }

    let mut values = [0f64; 4];
    for (value, obj) in values.iter_mut().zip(coords) {
        let (_, obj) = doc.dereference(obj).ok()?;
        *value = obj.as_float().ok()? as f64;
    }

    let width = (values[2] - values[0]).abs();
    let height = (values[3] - values[1]).abs();
    if width == 0.0 || height == 0.0 {
        return None;
    }

    Some(PageSize::new(width, height))
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, else Latin-1.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    bytes.iter().map(|&b| b as char).collect()
}
