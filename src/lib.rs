// THEORY:
// This file is the main entry point for the `silhouette_vision` library crate.
//
// The engine counts foreground shapes ("silhouettes") on an image whose background
// is a single, visually distinct color. The public surface is the `pipeline`
// module (`SilhouettePipeline`, `PipelineConfig`, `SilhouetteReport`) for one image
// and `parallel_pipeline` for batches, with `output` rendering reports as text or
// JSON. The building blocks in `core_modules` are
// public for callers who want to run a single stage, but most users never need them.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod output;
pub mod parallel_pipeline;
pub mod pipeline;

pub use error::SilhouetteError;
pub use pipeline::{PipelineConfig, SilhouettePipeline, SilhouetteReport};
