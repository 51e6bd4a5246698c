//! Last-rendered fragment per monitor.
//!
//! The [`FragmentStore`] doubles as the monitor registry: it is seeded with
//! the monitors found at startup and grows whenever a snapshot mentions a
//! monitor it has not seen before.  Entries are never removed.

use std::collections::BTreeMap;

/// `monitor id -> fragment`.
///
/// Iteration is in ascending monitor id, so emission order is stable for
/// the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentStore {
    inner: BTreeMap<String, String>,
}

impl FragmentStore {
    /// Create a store with an empty fragment for each of `monitors`.
    pub fn seeded(monitors: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner: monitors.into_iter().map(|m| (m, String::new())).collect(),
        }
    }

    /// Fragment last stored for `monitor`, or `""` if none.
    pub fn get(&self, monitor: &str) -> &str {
        self.inner.get(monitor).map(String::as_str).unwrap_or("")
    }

    /// Replace the fragment for `monitor`, registering it if new.
    pub fn set(&mut self, monitor: impl Into<String>, fragment: String) {
        self.inner.insert(monitor.into(), fragment);
    }

    /// Whether `monitor` has been seen.
    pub fn contains(&self, monitor: &str) -> bool {
        self.inner.contains_key(monitor)
    }

    /// Iterate over `(monitor, fragment)` pairs in monitor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of known monitors.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no monitor is known.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
