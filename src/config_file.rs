use std::path::Path;

use crate::{Result, SpaceGraphConfig, SpaceGraphError};

/// Load the run configuration. A missing file means all defaults; a file
/// that exists but does not parse is an error.
pub(crate) fn load_file_config(path: Option<&Path>) -> Result<SpaceGraphConfig> {
    let Some(path) = path else {
        return Ok(SpaceGraphConfig::default());
    };
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("config {} not found, using defaults", path.display());
            return Ok(SpaceGraphConfig::default());
        }
        Err(err) => return Err(SpaceGraphError::io(path, err)),
    };
    serde_json::from_str(&data).map_err(|e| SpaceGraphError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(crate) fn save_file_config(path: &Path, config: &SpaceGraphConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::write_atomic(path, json.as_bytes())
}
