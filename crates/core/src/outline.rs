//! Plain-text outline output.
//!
//! Renders a deck as one block per slide, blocks separated by a blank line,
//! for quick review before the slides go into a presentation tool.

use crate::types::{SlideDeck, SlideRecord};

/// Formatter for plain-text slide outlines.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Maximum content paragraphs shown per slide. None shows all.
    max_paragraphs: Option<usize>,
    /// Whether to list image placeholders under each slide.
    image_markers: bool,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            max_paragraphs: None,
            image_markers: true,
        }
    }
}

impl OutlineFormatter {
    /// Create a new formatter showing all paragraphs and image markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of paragraphs shown per slide.
    pub fn with_max_paragraphs(mut self, max: usize) -> Self {
        self.max_paragraphs = Some(max.max(1)); // At least 1 paragraph per slide
        self
    }

    /// Set whether image markers are listed.
    pub fn with_image_markers(mut self, enabled: bool) -> Self {
        self.image_markers = enabled;
        self
    }

    /// Format a single slide block.
    ///
    /// # Example output
    /// ```text
    /// # 2. Project goals
    /// Ship the importer before the spring release
    /// [image: Image from page 2]
    /// ```
    pub fn format_slide(&self, slide: &SlideRecord) -> String {
        let mut lines = vec![format!("# {}. {}", slide.page_number, slide.title)];

        let limit = self.max_paragraphs.unwrap_or(slide.content.len());
        lines.extend(
            slide
                .content
                .iter()
                .filter(|p| !p.is_empty())
                .take(limit)
                .cloned(),
        );

        if self.image_markers {
            lines.extend(slide.images.iter().map(|img| format!("[image: {}]", img.alt)));
        }

        lines.join("\n")
    }

    /// Format every slide of a deck, separated by blank lines.
    pub fn format(&self, deck: &SlideDeck) -> String {
        deck.slides
            .iter()
            .map(|slide| self.format_slide(slide))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, deck: &SlideDeck) -> String {
        let formatted = self.format(deck);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}

/// Three-line extraction summary for a deck.
///
/// The text figure divides the character count by 100 and rounds it, and
/// labels the result KB.
pub fn format_summary(deck: &SlideDeck) -> String {
    let text_kb = (deck.total_text_length as f64 / 100.0).round() as u64;
    format!(
        "Pages processed: {}\nText extracted: {} KB\nImages detected: {}\n",
        deck.total_pages, text_kb, deck.total_images
    )
}
