// THEORY:
// The `BackgroundEstimator` infers the background color from the image border.
// Silhouettes are expected to sit inside the frame, so the edges of the image are
// dominated by the background.
//
// Algorithm:
// 1.  Scan the top `k` rows, the bottom `k` rows, the left `k` columns and the right
//     `k` columns, each over its full extent. Corner pixels belong to two bands and
//     are counted once per band, which weights them double.
// 2.  Count every color by exact RGBA value in an insertion-ordered table.
// 3.  Return the color with the strictly greatest count. Among tied colors the one
//     inserted first wins.
//
// `k` is clamped to `min(width, height)` so small images never read out of bounds.

use crate::core_modules::decoded_image::DecodedImage;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::SilhouetteError;
use indexmap::IndexMap;
use tracing::{debug, warn};

pub const DEFAULT_BORDER_THICKNESS: u32 = 3;

pub struct BackgroundEstimator {
    border_thickness: u32,
}

impl Default for BackgroundEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_BORDER_THICKNESS)
    }
}

impl BackgroundEstimator {
    pub fn new(border_thickness: u32) -> Self {
        Self { border_thickness }
    }

    pub fn border_thickness(&self) -> u32 {
        self.border_thickness
    }

    /// Returns the most frequent border color of `image`.
    pub fn estimate<I: DecodedImage + ?Sized>(
        &self,
        image: &I,
    ) -> Result<Pixel, SilhouetteError> {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(SilhouetteError::NoBorderData { width, height });
        }

        let thickness = self.effective_thickness(width, height);
        let histogram = Self::border_histogram(image, thickness);

        let mut best: Option<(Pixel, usize)> = None;
        for (&color, &count) in &histogram {
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((color, count));
            }
        }

        // A non-empty image always contributes at least one border pixel.
        let (background, count) = best.ok_or(SilhouetteError::NoBorderData { width, height })?;
        debug!(
            %background,
            count,
            distinct_colors = histogram.len(),
            thickness,
            "estimated background color"
        );
        Ok(background)
    }

    fn effective_thickness(&self, width: u32, height: u32) -> u32 {
        let limit = width.min(height);
        if self.border_thickness > limit {
            warn!(
                requested = self.border_thickness,
                clamped = limit,
                "border thickness exceeds image size, clamping"
            );
            limit
        } else {
            self.border_thickness.max(1)
        }
    }

    fn border_histogram<I: DecodedImage + ?Sized>(
        image: &I,
        thickness: u32,
    ) -> IndexMap<Pixel, usize> {
        let width = image.width();
        let height = image.height();
        let mut histogram: IndexMap<Pixel, usize> = IndexMap::new();
        let mut record = |x: u32, y: u32| {
            *histogram.entry(image.pixel(x, y)).or_insert(0) += 1;
        };

        // Top and bottom bands.
        for x in 0..width {
            for y in 0..thickness {
                record(x, y);
            }
        }
        for x in 0..width {
            for y in height - thickness..height {
                record(x, y);
            }
        }

        // Left and right bands.
        for y in 0..height {
            for x in 0..thickness {
                record(x, y);
            }
        }
        for y in 0..height {
            for x in width - thickness..width {
                record(x, y);
            }
        }

        histogram
    }
}
