// THEORY:
// Every recoverable failure of the engine is an input error: a file that cannot be
// read or decoded, an image with no border to inspect, or a configuration that
// makes the classifier meaningless. They all surface as one `SilhouetteError` so
// callers can report them with a single message and stop.
//
// Broken internal invariants (a grid whose size disagrees with its state array,
// an out-of-range coordinate) are bugs, not inputs. Those panic and never appear here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SilhouetteError {
    #[error("No border data: image is {width}x{height}")]
    NoBorderData { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Worker pool failure: {0}")]
    WorkerPool(String),
}
