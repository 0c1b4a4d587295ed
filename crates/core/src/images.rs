//! Placeholder image detection.
//!
//! No raster data is extracted. A page that would render larger than a
//! threshold area is assumed to carry one image, and a fixed descriptor is
//! attached for it so downstream layout has something to reserve space for.

use crate::types::{ImageRef, PageSize, PLACEHOLDER_DATA_URL};
use serde::{Deserialize, Serialize};

/// Render scale used when measuring the page viewport.
pub const DEFAULT_VIEWPORT_SCALE: f64 = 1.5;

/// Viewport area (px²) above which a page is assumed to hold an image.
pub const DEFAULT_MIN_AREA: f64 = 100_000.0;

const PLACEHOLDER_WIDTH: u32 = 300;
const PLACEHOLDER_HEIGHT: u32 = 200;

/// Decides which pages get a placeholder image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageDetector {
    /// Scale applied to the page size before measuring its area.
    scale: f64,
    /// Strict lower bound on the scaled area.
    min_area: f64,
}

impl Default for ImageDetector {
    fn default() -> Self {
        Self {
            scale: DEFAULT_VIEWPORT_SCALE,
            min_area: DEFAULT_MIN_AREA,
        }
    }
}

impl ImageDetector {
    /// Create a detector with the default scale and area threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the minimum viewport area.
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    /// Detect images on a page.
    ///
    /// Returns at most one placeholder. Pages of unknown size get none.
    pub fn detect(&self, page_number: usize, size: Option<PageSize>) -> Vec<ImageRef> {
        let Some(size) = size else {
            log::debug!("Page {}: size unknown, skipping image detection", page_number);
            return Vec::new();
        };

        let area = size.viewport(self.scale).area();
        if area > self.min_area {
            vec![placeholder_image(page_number)]
        } else {
            Vec::new()
        }
    }
}

/// Build the fixed placeholder descriptor for a page.
pub fn placeholder_image(page_number: usize) -> ImageRef {
    ImageRef {
        id: format!("img-p{}-1", page_number),
        width: PLACEHOLDER_WIDTH,
        height: PLACEHOLDER_HEIGHT,
        data_url: PLACEHOLDER_DATA_URL.to_string(),
        alt: format!("Image from page {}", page_number),
    }
}
