//! Startup monitor discovery.

use crate::traits::MonitorSource;
use log::info;

/// Why discovery failed.  Both cases are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The underlying source could not be queried.
    #[error("monitor discovery failed: {0}")]
    Source(String),
    /// The source answered but listed no monitors.
    #[error("monitor discovery returned no monitors")]
    Empty,
}

/// Query `source` once and return the distinct monitor identifiers, in the
/// order the source reported them.
pub fn discover<M: MonitorSource>(source: &M) -> Result<Vec<String>, DiscoveryError> {
    let mut monitors: Vec<String> = Vec::new();
    for name in source
        .monitors()
        .map_err(|e| DiscoveryError::Source(e.to_string()))?
    {
        if !monitors.contains(&name) {
            monitors.push(name);
        }
    }
    if monitors.is_empty() {
        return Err(DiscoveryError::Empty);
    }
    info!("found {} monitor(s): {}", monitors.len(), monitors.join(", "));
    Ok(monitors)
}
