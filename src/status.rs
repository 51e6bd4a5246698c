//! The state machine that ties classification, decoding, rendering and
//! composition together.
//!
//! [`StatusLine`] owns the [`FragmentStore`] and the last clock text, and
//! reacts to raw input lines by updating them and composing the lines to
//! emit.

use crate::config::ThemeConfig;
use crate::message::{classify, Message};
use crate::render::render;
use crate::snapshot::{decode, DecodeError, Snapshot};
use crate::store::FragmentStore;
use log::debug;

/// What handling one input line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line carried nothing; nothing is emitted.
    Skipped,
    /// The clock changed; every monitor is re-emitted with the new text.
    Clock(Vec<String>),
    /// A snapshot was applied; every monitor is re-emitted.
    Snapshot(Vec<String>),
}

impl Outcome {
    /// Lines to emit, in order.
    pub fn lines(&self) -> &[String] {
        match self {
            Outcome::Skipped => &[],
            Outcome::Clock(lines) | Outcome::Snapshot(lines) => lines,
        }
    }

    /// Consume the outcome, yielding the lines to emit.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Outcome::Skipped => Vec::new(),
            Outcome::Clock(lines) | Outcome::Snapshot(lines) => lines,
        }
    }
}

/// Composes status lines from desktop snapshots and clock updates.
///
/// # Typical usage
///
/// ```ignore
/// let mut status = StatusLine::new(vec!["HDMI-1".into()], ThemeConfig::default());
/// for line in status.handle("clock:12:00")?.into_lines() {
///     println!("{}", line);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StatusLine {
    store: FragmentStore,
    clock: String,
    theme: ThemeConfig,
}

impl StatusLine {
    /// Create a status line for the monitors found at startup.
    pub fn new(monitors: Vec<String>, theme: ThemeConfig) -> Self {
        Self {
            store: FragmentStore::seeded(monitors),
            clock: String::new(),
            theme,
        }
    }

    /// The per-monitor fragments.
    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// The last clock text received.
    pub fn clock(&self) -> &str {
        &self.clock
    }

    /// Handle one raw input line.
    ///
    /// A malformed snapshot returns an error and leaves all state untouched.
    pub fn handle(&mut self, line: &str) -> Result<Outcome, DecodeError> {
        let message = classify(line);
        debug!("received {}", message);
        match message {
            Message::Skip => Ok(Outcome::Skipped),
            Message::Clock(text) => {
                self.clock = text.to_string();
                Ok(Outcome::Clock(self.compose()))
            }
            Message::Snapshot(raw) => {
                let snapshot = decode(raw)?;
                self.apply(&snapshot);
                Ok(Outcome::Snapshot(self.compose()))
            }
        }
    }

    /// Render every screen in `snapshot` and store the fragments.
    ///
    /// Monitors missing from the snapshot keep their previous fragment.
    pub fn apply(&mut self, snapshot: &Snapshot) {
        for (monitor, screen) in &snapshot.screens {
            if !self.store.contains(monitor) {
                debug!("new monitor {}", monitor);
            }
            let fragment = render(monitor, screen, &snapshot.desktop_mode, &self.theme);
            self.store.set(monitor.as_str(), fragment);
        }
    }

    /// One line per known monitor: its fragment followed by the clock.
    pub fn compose(&self) -> Vec<String> {
        self.store
            .iter()
            .map(|(_, fragment)| format!("{}{}", fragment, self.clock))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAP: &str = r#"{"version":1,"current_screen":"HDMI-1","desktop_mode":"tile","screens":{"HDMI-1":{"randr_order":0,"desktops":{"1":{"number":1,"is_current":true,"number_of_clients":2},"2":{"number":2,"is_current":false,"number_of_clients":0}}}}}"#;

    const FRAGMENT: &str = "%{SnHDMI-1}|%{B#39c488} 1 %{B-}%{F#FF00FF}|%{F-}%{B#D7C72F}[Scr:HDMI-1][N:0][A:2][L:tile]%{B-}";

    fn status(monitors: &[&str]) -> StatusLine {
        StatusLine::new(monitors.iter().map(|m| m.to_string()).collect(), ThemeConfig::default())
    }

    #[test]
    fn snapshot_renders_and_emits() {
        let mut s = status(&["HDMI-1"]);
        let out = s.handle(SNAP).unwrap();
        assert_eq!(out, Outcome::Snapshot(vec![FRAGMENT.to_string()]));
        assert_eq!(s.store().get("HDMI-1"), FRAGMENT);
    }

    #[test]
    fn clock_update_reuses_fragments() {
        let mut s = status(&["HDMI-1"]);
        s.handle(SNAP).unwrap();
        let before = s.store().clone();
        let out = s.handle("clock:12:00").unwrap();
        assert_eq!(out.lines(), &[format!("{}12:00", FRAGMENT)]);
        assert_eq!(s.store(), &before);
        assert_eq!(s.clock(), "12:00");
    }

    #[test]
    fn clock_persists_across_snapshots() {
        let mut s = status(&["HDMI-1"]);
        s.handle("clock:09:30").unwrap();
        let out = s.handle(SNAP).unwrap();
        assert_eq!(out.into_lines(), vec![format!("{}09:30", FRAGMENT)]);
    }

    #[test]
    fn clock_before_any_snapshot_emits_bare_clock() {
        let mut s = status(&["A", "B"]);
        let out = s.handle("clock:now").unwrap();
        assert_eq!(out, Outcome::Clock(vec!["now".to_string(), "now".to_string()]));
    }

    #[test]
    fn malformed_snapshot_changes_nothing() {
        let mut s = status(&["HDMI-1"]);
        s.handle(SNAP).unwrap();
        s.handle("clock:1").unwrap();
        let before = s.store().clone();
        assert!(s.handle(r#"{"version":"#).is_err());
        assert_eq!(s.store(), &before);
        assert_eq!(s.clock(), "1");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut s = status(&["HDMI-1"]);
        assert_eq!(s.handle("").unwrap(), Outcome::Skipped);
        assert!(s.handle("  ").unwrap().lines().is_empty());
    }

    #[test]
    fn unseen_monitor_is_registered() {
        let mut s = status(&["HDMI-1"]);
        let snap = r#"{"desktop_mode":"tile","screens":{"DP-9":{"randr_order":3,"desktops":{}}}}"#;
        let out = s.handle(snap).unwrap();
        assert_eq!(s.store().len(), 2);
        assert!(s.store().contains("DP-9"));
        // Sorted by monitor id: DP-9 first, HDMI-1 (still empty) second.
        assert_eq!(out.lines(), &["%{SnDP-9}%{F#FF00FF}|%{F-}".to_string(), String::new()]);
    }

    #[test]
    fn absent_monitor_keeps_its_fragment() {
        let mut s = status(&["HDMI-1", "DP-1"]);
        s.handle(SNAP).unwrap();
        s.handle(r#"{"screens":{"DP-1":{"desktops":{}}}}"#).unwrap();
        assert_eq!(s.store().get("HDMI-1"), FRAGMENT);
        assert_eq!(s.store().get("DP-1"), "%{SnDP-1}%{F#FF00FF}|%{F-}");
    }

    #[test]
    fn identical_snapshot_is_idempotent() {
        let mut s = status(&["HDMI-1"]);
        let first = s.handle(SNAP).unwrap();
        let store = s.store().clone();
        let second = s.handle(SNAP).unwrap();
        assert_eq!(first, second);
        assert_eq!(s.store(), &store);
    }
}
