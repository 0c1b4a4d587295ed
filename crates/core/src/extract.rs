//! The extraction pipeline: raw pages in, slide deck out.

use crate::images::ImageDetector;
use crate::text::{
    collapse_layout, collapse_whitespace, generate_page_title, split_into_paragraphs,
    split_into_sentences,
};
use crate::types::{PageContent, RawPage, SlideDeck, SlideRecord};
use serde::{Deserialize, Serialize};

/// Options controlling how pages are turned into slides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionOptions {
    /// Split paragraphs on the page's own blank lines instead of treating
    /// the collapsed page text as one paragraph.
    pub preserve_line_breaks: bool,

    /// Placeholder image settings.
    pub image_detector: ImageDetector,

    /// Stop after this many pages.
    pub max_pages: Option<usize>,
}

impl ExtractionOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to keep the page's line structure for paragraph splitting.
    pub fn with_preserve_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the image detector.
    pub fn with_image_detector(mut self, detector: ImageDetector) -> Self {
        self.image_detector = detector;
        self
    }

    /// Limit the number of pages processed.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Progress report emitted while pages are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProgress {
    /// 1-based page about to be processed, or the last page once finished.
    pub current_page: usize,
    pub total_pages: usize,
    /// 0 to 100.
    pub percent: u8,
}

impl ExtractionProgress {
    fn before_page(current_page: usize, total_pages: usize) -> Self {
        let percent = ((current_page - 1) as f64 / total_pages as f64 * 100.0).round() as u8;
        Self {
            current_page,
            total_pages,
            percent,
        }
    }

    fn finished(total_pages: usize) -> Self {
        Self {
            current_page: total_pages,
            total_pages,
            percent: 100,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.percent == 100
    }
}

/// Turns raw backend pages into page content and slides.
#[derive(Debug, Clone, Default)]
pub struct SlideExtractor {
    options: ExtractionOptions,
}

impl SlideExtractor {
    /// Create a new extractor.
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Run the heuristics over a single page.
    pub fn extract_page(&self, raw: &RawPage) -> PageContent {
        let text = collapse_whitespace(&raw.text);
        let layout_text = collapse_layout(&raw.text);

        let images = self
            .options
            .image_detector
            .detect(raw.page_number, raw.size);

        let paragraphs = if self.options.preserve_line_breaks {
            split_into_paragraphs(&layout_text)
        } else {
            split_into_paragraphs(&text)
        };

        PageContent {
            page_number: raw.page_number,
            title: generate_page_title(&text, raw.page_number),
            sentences: split_into_sentences(&text),
            paragraphs,
            images,
            size: raw.size,
            layout_text,
            text,
        }
    }

    /// Process pages in order, reporting progress to `observer`.
    ///
    /// The observer sees one report before each page and a final 100% report.
    pub fn extract_pages<F>(&self, raws: &[RawPage], mut observer: F) -> Vec<PageContent>
    where
        F: FnMut(ExtractionProgress),
    {
        let limit = self.options.max_pages.unwrap_or(raws.len()).min(raws.len());
        let raws = &raws[..limit];
        let total = raws.len();
        let mut pages = Vec::with_capacity(total);

        for (idx, raw) in raws.iter().enumerate() {
            observer(ExtractionProgress::before_page(idx + 1, total));

            let page = self.extract_page(raw);
            log::debug!(
                "Page {}: {} chars, {} paragraphs, {} images",
                page.page_number,
                page.text.chars().count(),
                page.paragraphs.len(),
                page.images.len()
            );
            pages.push(page);
        }

        observer(ExtractionProgress::finished(total));
        pages
    }

    /// Process pages and assemble a deck in one step.
    pub fn extract_deck(&self, title: impl Into<String>, raws: &[RawPage]) -> SlideDeck {
        let pages = self.extract_pages(raws, |_| {});
        build_deck(title, &pages)
    }
}

/// Build the slide for one page.
///
/// Content is the page's paragraphs, or the whole collapsed text when no
/// paragraphs were found.
pub fn build_slide(page: &PageContent) -> SlideRecord {
    let content = if page.paragraphs.is_empty() {
        vec![page.text.clone()]
    } else {
        page.paragraphs.clone()
    };

    SlideRecord {
        title: page.title.clone(),
        content,
        images: page.images.clone(),
        page_number: page.page_number,
    }
}

/// Organize extracted pages into a deck, one slide per page.
pub fn build_deck(title: impl Into<String>, pages: &[PageContent]) -> SlideDeck {
    let slides: Vec<SlideRecord> = pages.iter().map(build_slide).collect();

    SlideDeck {
        title: title.into(),
        total_pages: pages.len(),
        total_images: pages.iter().map(|p| p.images.len()).sum(),
        total_text_length: pages.iter().map(|p| p.text.chars().count()).sum(),
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_page(number: usize, text: &str) -> RawPage {
        RawPage::new(number, text).with_size(612.0, 792.0)
    }

    #[test]
    fn test_extract_page_collapses_and_titles() {
        let extractor = SlideExtractor::default();
        let raw = letter_page(1, "Getting   Started.\nInstall the toolchain!\n\nThen build.");

        let page = extractor.extract_page(&raw);

        assert_eq!(page.text, "Getting Started. Install the toolchain! Then build.");
        assert_eq!(page.title, "Getting Started");
        assert_eq!(
            page.sentences,
            vec!["Getting Started.", "Install the toolchain.", "Then build."]
        );
        // Collapsed text has no blank lines left, so it is one paragraph
        assert_eq!(page.paragraphs, vec![page.text.clone()]);
        assert_eq!(page.images.len(), 1);
    }

    #[test]
    fn test_extract_page_preserving_line_breaks() {
        let options = ExtractionOptions::new().with_preserve_line_breaks(true);
        let extractor = SlideExtractor::new(options);
        let raw = letter_page(2, "Overview\nline two\n\n\nDetails  here");

        let page = extractor.extract_page(&raw);

        assert_eq!(page.paragraphs, vec!["Overview\nline two", "Details here"]);
        // Title still comes from the collapsed text
        assert_eq!(page.title, "Overview line two Details here");
    }

    #[test]
    fn test_empty_page() {
        let extractor = SlideExtractor::default();
        let page = extractor.extract_page(&RawPage::new(4, "   \n "));

        assert_eq!(page.text, "");
        assert_eq!(page.title, "Page 4");
        assert!(page.sentences.is_empty());
        assert!(page.paragraphs.is_empty());
        assert!(page.images.is_empty());

        let slide = build_slide(&page);
        assert_eq!(slide.content, vec![String::new()]);
        assert_eq!(slide.page_number, 4);
    }

    #[test]
    fn test_build_deck_totals_and_order() {
        let extractor = SlideExtractor::default();
        let raws = vec![
            letter_page(1, "First slide title. Body"),
            RawPage::new(2, "Second"),
            letter_page(3, ""),
        ];

        let deck = extractor.extract_deck("Talk", &raws);

        assert_eq!(deck.title, "Talk");
        assert_eq!(deck.total_pages, 3);
        assert_eq!(deck.total_images, 2);
        assert_eq!(deck.total_text_length, "First slide title. Body".len() + "Second".len());
        assert_eq!(
            deck.slides.iter().map(|s| s.page_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(deck.titles(), vec!["First slide title", "Second", "Page 3"]);
    }

    #[test]
    fn test_progress_reports() {
        let extractor = SlideExtractor::default();
        let raws: Vec<RawPage> = (1..=4).map(|n| RawPage::new(n, "text")).collect();
        let mut reports = Vec::new();

        let pages = extractor.extract_pages(&raws, |p| reports.push(p.percent));

        assert_eq!(pages.len(), 4);
        assert_eq!(reports, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn test_progress_rounds() {
        let extractor = SlideExtractor::default();
        let raws: Vec<RawPage> = (1..=3).map(|n| RawPage::new(n, "text")).collect();
        let mut reports = Vec::new();

        extractor.extract_pages(&raws, |p| reports.push(p));

        let percents: Vec<u8> = reports.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![0, 33, 67, 100]);
        assert!(reports.last().is_some_and(|p| p.is_finished()));
        assert_eq!(reports[1].current_page, 2);
        assert_eq!(reports[1].total_pages, 3);
    }

    #[test]
    fn test_max_pages_truncates() {
        let options = ExtractionOptions::new().with_max_pages(Some(2));
        let extractor = SlideExtractor::new(options);
        let raws: Vec<RawPage> = (1..=5).map(|n| RawPage::new(n, "text")).collect();

        let deck = extractor.extract_deck("Limited", &raws);

        assert_eq!(deck.total_pages, 2);
        assert_eq!(deck.slides.len(), 2);
    }

    #[test]
    fn test_no_pages() {
        let extractor = SlideExtractor::default();
        let mut reports = Vec::new();
        let pages = extractor.extract_pages(&[], |p| reports.push(p));

        assert!(pages.is_empty());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].percent, 100);

        let deck = build_deck("Empty", &pages);
        assert!(deck.is_empty());
        assert_eq!(deck.total_text_length, 0);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ExtractionOptions =
            serde_json::from_str(r#"{"preserveLineBreaks": true}"#).unwrap();
        assert!(options.preserve_line_breaks);
        assert_eq!(options.image_detector.scale(), 1.5);
        assert_eq!(options.max_pages, None);

        let options: ExtractionOptions =
            serde_json::from_str(r#"{"imageDetector": {"minArea": 5.0}, "maxPages": 3}"#).unwrap();
        assert_eq!(options.image_detector.min_area(), 5.0);
        assert_eq!(options.image_detector.scale(), 1.5);
        assert_eq!(options.max_pages, Some(3));
    }
}
