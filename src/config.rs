//! Application configuration.
//!
//! The configuration is loaded from an optional JSON file
//! (`$XDG_CONFIG_HOME/fvwm3-status/config.json`) and then overridden by the
//! environment.  Every section is optional; a minimal `{}` file, or no file
//! at all, yields the compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "pipe": "/run/user/1000/fvwm3.pipe",
//!   "diagnostics": { "enabled": true, "listen": "127.0.0.1:6060" },
//!   "theme": { "current_bg": "#39c488", "title_padding": 4 }
//! }
//! ```
//!
//! # Environment
//!
//! * `FVWM3_STATUS_PIPE` — path of the status pipe (overrides `pipe`).
//! * `FRS_PROFILE=1` — enable the diagnostics endpoint.

use log::info;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default location of the status pipe.
pub const DEFAULT_PIPE: &str = "/tmp/fvwm3.pipe";

/// Environment variable naming the status pipe.
pub const PIPE_ENV: &str = "FVWM3_STATUS_PIPE";

/// Environment variable that enables the diagnostics endpoint when `1`.
pub const PROFILE_ENV: &str = "FRS_PROFILE";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the named pipe FVWM3 writes status lines to.
    #[serde(default = "default_pipe")]
    pub pipe: PathBuf,

    /// Auxiliary HTTP endpoint exposing pipeline counters.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Colours and padding used when rendering fragments.
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_pipe() -> PathBuf {
    PathBuf::from(DEFAULT_PIPE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipe: default_pipe(),
            diagnostics: DiagnosticsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Diagnostics endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    /// Address the endpoint binds to.
    pub listen: SocketAddr,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen: SocketAddr::from(([127, 0, 0, 1], 6060)),
        }
    }
}

/// Lemonbar colours used by the renderer.
///
/// Colours are passed through verbatim, so anything lemonbar accepts
/// (`#RRGGBB`, `#AARRGGBB`) works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Background of the focused desktop.
    pub current_bg: String,
    /// Background of desktops that have windows.
    pub occupied_bg: String,
    /// Background of the `[Scr:..][N:..][A:..][L:..]` status segment.
    pub status_bg: String,
    /// Foreground of the `|` between desktops and status.
    pub separator_fg: String,
    /// Underline/overline colour of the focused window title.
    pub title_line: String,
    /// Background of the focused window title.
    pub title_bg: String,
    /// Spaces on either side of the focused window title.
    pub title_padding: usize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            current_bg: "#39c488".into(),
            occupied_bg: "#004C98".into(),
            status_bg: "#D7C72F".into(),
            separator_fg: "#FF00FF".into(),
            title_line: "#00FF00".into(),
            title_bg: "#AC59FF".into(),
            title_padding: 8,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Apply environment overrides, reading variables through `var`.
    ///
    /// Taking a lookup function instead of reading the process environment
    /// keeps this testable.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        match var(PIPE_ENV).filter(|p| !p.is_empty()) {
            Some(pipe) => self.pipe = PathBuf::from(pipe),
            None => info!("pipe defaulting to {}", self.pipe.display()),
        }
        if var(PROFILE_ENV).as_deref() == Some("1") {
            self.diagnostics.enabled = true;
        }
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
