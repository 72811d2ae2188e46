use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::{Result, SpaceGraphConfig, SpaceGraphError};

/// Shared blocking HTTP agent for both upstream services.
pub(crate) fn http_agent(config: &SpaceGraphConfig) -> ureq::Agent {
    let timeout = Duration::from_secs(config.http_timeout_secs.max(1));
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .user_agent(concat!("spacegraph/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Write through a temporary sibling and rename into place.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SpaceGraphError::io(parent, e))?;
        }
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, bytes).map_err(|e| SpaceGraphError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| SpaceGraphError::io(path, e))?;
    Ok(())
}

/// Local identifier for text that could not be resolved: spaces become
/// underscores, appended to the local namespace.
pub(crate) fn fallback_uri(namespace: &str, text: &str) -> String {
    format!("{namespace}{}", text.replace(' ', "_"))
}
