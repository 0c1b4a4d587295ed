//! Domain types for representing extracted document content.

use serde::{Deserialize, Serialize};

/// The format of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
}

impl DocumentFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        // PDF files start with "%PDF-"
        if bytes.len() >= 5 && bytes.starts_with(b"%PDF-") {
            return Some(Self::Pdf);
        }

        None
    }
}

/// Page dimensions in PDF user-space units (points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of the page when rendered at the given scale.
    pub fn viewport(&self, scale: f64) -> PageSize {
        PageSize {
            width: self.width * scale,
            height: self.height * scale,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A page as handed over by a document backend, before any heuristics run.
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    /// 1-based page number.
    pub page_number: usize,

    /// Text as produced by the backend, line breaks included.
    pub text: String,

    /// Page size, if the backend could determine it.
    pub size: Option<PageSize>,
}

impl RawPage {
    /// Create a raw page without size information.
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            size: None,
        }
    }

    /// Attach a page size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(PageSize::new(width, height));
        self
    }
}

/// Reference to an image attached to a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Image data URL, or the literal `placeholder` when no data was extracted.
    pub data_url: String,
    pub alt: String,
}

/// Marker stored in `data_url` for fabricated image descriptors.
pub const PLACEHOLDER_DATA_URL: &str = "placeholder";

impl ImageRef {
    /// Whether this reference carries no real image data.
    pub fn is_placeholder(&self) -> bool {
        self.data_url == PLACEHOLDER_DATA_URL
    }
}

/// Everything extracted from a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,

    /// Page text collapsed to a single line.
    pub text: String,

    /// Page text with line breaks kept, horizontal whitespace collapsed.
    pub layout_text: String,

    pub size: Option<PageSize>,
    pub images: Vec<ImageRef>,
    pub title: String,
    pub sentences: Vec<String>,
    pub paragraphs: Vec<String>,
}

/// A single slide, one per source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRecord {
    pub title: String,

    /// Body paragraphs in reading order.
    pub content: Vec<String>,

    pub images: Vec<ImageRef>,

    /// 1-based number of the page this slide was built from.
    pub page_number: usize,
}

/// The complete result of running the extraction pipeline over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDeck {
    /// Deck title, usually derived from the source filename.
    pub title: String,

    /// Slides in page order.
    pub slides: Vec<SlideRecord>,

    pub total_pages: usize,
    pub total_images: usize,

    /// Sum of the collapsed page text lengths, in characters.
    pub total_text_length: usize,
}

impl SlideDeck {
    /// Get all slide titles in order.
    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("pptx"), None);
    }

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            DocumentFormat::from_magic(b"%PDF-1.7\n"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(DocumentFormat::from_magic(b"%PDF"), None);
        assert_eq!(DocumentFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0x00]), None);
    }

    #[test]
    fn test_viewport_area() {
        let letter = PageSize::new(612.0, 792.0);
        let viewport = letter.viewport(1.5);
        assert_eq!(viewport.width, 918.0);
        assert_eq!(viewport.height, 1188.0);
        assert_eq!(viewport.area(), 918.0 * 1188.0);
    }

    #[test]
    fn test_slide_record_serializes_camel_case() {
        let slide = SlideRecord {
            title: "Intro".to_string(),
            content: vec!["Hello".to_string()],
            images: vec![ImageRef {
                id: "img-p1-1".to_string(),
                width: 300,
                height: 200,
                data_url: PLACEHOLDER_DATA_URL.to_string(),
                alt: "Image from page 1".to_string(),
            }],
            page_number: 1,
        };

        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["images"][0]["dataUrl"], "placeholder");
        assert!(slide.images[0].is_placeholder());
    }
}
