use crate::error::SilhouetteError;
use crate::pipeline::PipelineConfig;
use std::fs;
use std::path::Path;

/// Reads a `PipelineConfig` from a JSON file. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig, SilhouetteError> {
    let contents = fs::read_to_string(path).map_err(|source| SilhouetteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PipelineConfig =
        serde_json::from_str(&contents).map_err(|source| SilhouetteError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
