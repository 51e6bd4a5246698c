//! [`MonitorSource`] implementation backed by `xrandr --listactivemonitors`.
//!
//! The command prints a header followed by one line per active monitor:
//!
//! ```text
//! Monitors: 2
//!  0: +*HDMI-1 1920/531x1080/299+0+0  HDMI-1
//!  1: +DP-1 2560/597x1440/336+1920+0  DP-1
//! ```
//!
//! The last whitespace-delimited token of every line after the header is
//! the monitor identifier.

use crate::traits::MonitorSource;
use log::debug;
use std::process::Command;

/// Monitor source that runs `xrandr`.
pub struct XrandrMonitors {
    program: String,
}

/// Errors that can occur when running `xrandr`.
#[derive(Debug, thiserror::Error)]
#[error("xrandr error: {0}")]
pub struct XrandrError(String);

impl Default for XrandrMonitors {
    fn default() -> Self {
        Self::new()
    }
}

impl XrandrMonitors {
    /// Use the `xrandr` found on `$PATH`.
    pub fn new() -> Self {
        Self::with_program("xrandr")
    }

    /// Use a specific `xrandr` binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MonitorSource for XrandrMonitors {
    type Error = XrandrError;

    fn monitors(&self) -> Result<Vec<String>, Self::Error> {
        let output = Command::new(&self.program)
            .arg("--listactivemonitors")
            .output()
            .map_err(|e| XrandrError(format!("spawn {}: {}", self.program, e)))?;
        if !output.status.success() {
            return Err(XrandrError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let stdout =
            String::from_utf8(output.stdout).map_err(|e| XrandrError(format!("utf-8: {}", e)))?;
        debug!("xrandr output: {:?}", stdout);
        Ok(parse_active_monitors(&stdout))
    }
}

/// Extract monitor identifiers from `xrandr --listactivemonitors` output.
pub fn parse_active_monitors(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().last())
        .map(str::to_string)
        .collect()
}
