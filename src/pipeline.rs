// THEORY:
// The `pipeline` module is the top-level API of the engine. It runs the whole
// segmentation stack for one decoded image and returns a `SilhouetteReport`.
//
// Stages, strictly in order:
// 1.  Background estimation from the border bands.
// 2.  Classifier construction from that color and the similarity threshold.
// 3.  Padded grid construction.
// 4.  Component scan.
// 5.  Size filter: keep components larger than `total_cells * fraction`, then move
//     them from padded-grid into image coordinates.
//
// A `SilhouettePipeline` holds only its configuration. Every call to `analyze`
// builds its own grid and scanner, so one pipeline can serve many images and many
// threads at once.

use crate::core_modules::background_estimator::{BackgroundEstimator, DEFAULT_BORDER_THICKNESS};
use crate::core_modules::color_classifier::color_classifier::{
    ColorClassifier, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::core_modules::component_scanner::ComponentScanner;
use crate::core_modules::decoded_image::DecodedImage;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::SilhouetteError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

// Re-export key data structures for the public API.
pub use crate::core_modules::silhouette::{Point, Silhouette};

pub const DEFAULT_MINIMUM_SILHOUETTE_FRACTION: f64 = 0.0005;

/// Configuration for the SilhouettePipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Equivalence a pixel must exceed to count as background. Raising it makes
    /// background detection stricter. Must lie in `[0, 1)`.
    pub color_similarity_threshold: f64,
    /// Share of the padded grid a component must exceed to be reported.
    pub minimum_silhouette_fraction: f64,
    /// Rows/columns inspected on each edge when inferring the background color.
    pub border_inspection_thickness: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            color_similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            minimum_silhouette_fraction: DEFAULT_MINIMUM_SILHOUETTE_FRACTION,
            border_inspection_thickness: DEFAULT_BORDER_THICKNESS,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), SilhouetteError> {
        let threshold = self.color_similarity_threshold;
        // At 1.0 nothing is background-like, not even the padding frame.
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(SilhouetteError::InvalidConfig(format!(
                "color_similarity_threshold must be in [0, 1), got {threshold}"
            )));
        }
        let fraction = self.minimum_silhouette_fraction;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(SilhouetteError::InvalidConfig(format!(
                "minimum_silhouette_fraction must be a non-negative number, got {fraction}"
            )));
        }
        if self.border_inspection_thickness == 0 {
            return Err(SilhouetteError::InvalidConfig(
                "border_inspection_thickness must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The result of analyzing one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SilhouetteReport {
    /// The inferred background color.
    pub background: Pixel,
    pub image_width: u32,
    pub image_height: u32,
    /// Cells in the padded grid, `(width + 2) * (height + 2)`.
    pub total_cells: usize,
    /// Pixel count a component had to exceed to be retained.
    pub size_threshold: f64,
    /// Foreground components found before size filtering.
    pub discovered_components: usize,
    /// Background-like cells visited individually by the scan.
    pub background_visits: usize,
    /// Retained silhouettes, in discovery order, in image coordinates.
    pub silhouettes: Vec<Silhouette>,
}

impl SilhouetteReport {
    pub fn silhouette_count(&self) -> usize {
        self.silhouettes.len()
    }

    /// Pixel counts of the retained silhouettes, in discovery order.
    pub fn sizes(&self) -> Vec<usize> {
        self.silhouettes.iter().map(|s| s.pixel_count).collect()
    }
}

/// The main, top-level struct for the segmentation engine.
#[derive(Debug, Clone)]
pub struct SilhouettePipeline {
    config: PipelineConfig,
}

impl SilhouettePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, SilhouetteError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn analyze<I: DecodedImage + ?Sized>(
        &self,
        image: &I,
    ) -> Result<SilhouetteReport, SilhouetteError> {
        // Stage 1: Background Estimation
        let estimator = BackgroundEstimator::new(self.config.border_inspection_thickness);
        let background = estimator.estimate(image)?;

        // Stage 2: Classification Predicate
        let classifier = ColorClassifier::new(background, self.config.color_similarity_threshold);

        // Stage 3: Padded Grid
        let grid = PixelGrid::build(image, background);

        // Stage 4: Connected Components
        let outcome = ComponentScanner::new(&grid, classifier).scan();
        let discovered_components = outcome.components.len();
        let background_visits = outcome.background_visits;
        let total_cells = outcome.total_cells;

        // Stage 5: Size Filter
        let size_threshold = outcome.size_threshold(self.config.minimum_silhouette_fraction);
        let silhouettes: Vec<Silhouette> = outcome
            .into_retained(self.config.minimum_silhouette_fraction)
            .into_iter()
            .map(Silhouette::into_image_space)
            .collect();
        debug!(
            discovered_components,
            retained = silhouettes.len(),
            size_threshold,
            "applied silhouette size filter"
        );

        Ok(SilhouetteReport {
            background,
            image_width: grid.image_width(),
            image_height: grid.image_height(),
            total_cells,
            size_threshold,
            discovered_components,
            background_visits,
            silhouettes,
        })
    }

    /// Decodes the image at `path` and analyzes it.
    pub fn analyze_path(&self, path: &Path) -> Result<SilhouetteReport, SilhouetteError> {
        let image = image_helper::load_rgba(path)?;
        let report = self.analyze(&image)?;
        info!(
            path = %path.display(),
            background = %report.background,
            silhouettes = report.silhouette_count(),
            "analyzed image"
        );
        Ok(report)
    }
}
