//! Desktop-state snapshots as sent by FVWM3.
//!
//! A snapshot describes every monitor at once:
//!
//! ```json
//! {
//!   "version": 1,
//!   "current_screen": "HDMI-1",
//!   "desktop_mode": "tile",
//!   "screens": {
//!     "HDMI-1": {
//!       "current_client": "xterm",
//!       "randr_order": 0,
//!       "desktops": {
//!         "1": { "number": 1, "is_current": true, "number_of_clients": 2 }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Every field is optional and falls back to its zero value (`0`, `false`,
//! empty string or map), so one sparse desktop entry never costs the rest
//! of the snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete description of all monitors' desktops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Protocol version.  Informational only.
    pub version: i64,
    /// Identifier of the focused monitor.
    pub current_screen: String,
    /// Layout mode label, shown in the status segment.
    pub desktop_mode: String,
    /// `monitor id -> screen state`.
    pub screens: BTreeMap<String, ScreenState>,
}

/// Desktop state of one monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenState {
    /// Title of the focused window on this monitor; empty when none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub current_client: String,
    /// Position of this output in RandR order.
    pub randr_order: i64,
    /// `display label -> desktop`.
    pub desktops: BTreeMap<String, DesktopState>,
}

/// One virtual desktop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopState {
    /// Sort key.  The map key, not this number, is what gets displayed.
    pub number: i64,
    pub is_current: bool,
    pub is_urgent: bool,
    pub number_of_clients: u32,
}

/// A line that could not be decoded as a [`Snapshot`].
#[derive(Debug, thiserror::Error)]
#[error("malformed snapshot: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode one snapshot line.
pub fn decode(text: &str) -> Result<Snapshot, DecodeError> {
    Ok(serde_json::from_str(text)?)
}
