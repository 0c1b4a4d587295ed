//! Core domain types, text heuristics, and slide assembly for turning
//! PDF page content into slide decks.

pub mod error;
pub mod extract;
pub mod images;
pub mod outline;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use extract::{build_deck, build_slide, ExtractionOptions, ExtractionProgress, SlideExtractor};
pub use images::ImageDetector;
pub use outline::{format_summary, OutlineFormatter};
pub use types::{
    DocumentFormat, ImageRef, PageContent, PageSize, RawPage, SlideDeck, SlideRecord,
};
