//! Classification of raw input lines.
//!
//! The status pipe carries two kinds of lines: clock updates with a literal
//! `clock:` prefix, and JSON desktop-state snapshots.  [`classify`] decides
//! which one a line is without decoding it.

use std::fmt;

/// Prefix that marks a clock update.
pub const CLOCK_PREFIX: &str = "clock:";

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    /// New clock text (everything after the prefix).
    Clock(&'a str),
    /// A line that should be decoded as a snapshot.
    Snapshot(&'a str),
    /// Nothing to do (blank line or a transient empty read).
    Skip,
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Clock(text) => write!(f, "clock {:?}", text),
            Message::Snapshot(raw) => write!(f, "snapshot ({} bytes)", raw.len()),
            Message::Skip => write!(f, "skip"),
        }
    }
}

/// Classify a single line.
///
/// A trailing line terminator (`\n` or `\r\n`) is ignored.  Whitespace-only
/// lines are skipped.
pub fn classify(line: &str) -> Message<'_> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Message::Skip;
    }
    match line.strip_prefix(CLOCK_PREFIX) {
        Some(text) => Message::Clock(text),
        None => Message::Snapshot(line),
    }
}
