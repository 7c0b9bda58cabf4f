pub mod background_estimator;
pub mod color_classifier;
pub mod component_scanner;
pub mod decoded_image;
pub mod pixel;
pub mod pixel_grid;
pub mod silhouette;
pub mod utils;
