//! Core traits that decouple the status pipeline from its I/O.
//!
//! The pipeline only sees a [`LineSource`] (where raw lines come from) and,
//! at startup, a [`MonitorSource`] (which monitors exist).  Concrete
//! backends live in [`fifo`](crate::fifo) and [`xrandr`](crate::xrandr);
//! tests use in-memory doubles.

/// Abstraction over whatever enumerates the physical monitors.
///
/// An implementation might shell out to `xrandr`, or it might be a fixed
/// list used in tests.
pub trait MonitorSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Return the monitor identifiers in output-enumeration order.
    fn monitors(&self) -> Result<Vec<String>, Self::Error>;
}

/// A source of raw, newline-delimited input lines.
///
/// # Contract
///
/// * [`next_line`](LineSource::next_line) **blocks** until a line is
///   available.
/// * `Ok(None)` means the source is exhausted for good; the caller stops.
/// * Returned lines carry no trailing line terminator.  They may be empty.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait LineSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Read the next line.
    fn next_line(&mut self) -> Result<Option<String>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    /// A test double that hands out a fixed sequence of lines.
    struct MockLines(VecDeque<String>);

    impl LineSource for MockLines {
        type Error = MockError;

        fn next_line(&mut self) -> Result<Option<String>, MockError> {
            Ok(self.0.pop_front())
        }
    }

    struct MockMonitors;

    impl MonitorSource for MockMonitors {
        type Error = MockError;

        fn monitors(&self) -> Result<Vec<String>, MockError> {
            Ok(vec!["MOCK-1".into()])
        }
    }

    #[test]
    fn mock_source_drains_then_ends() {
        let mut src = MockLines(VecDeque::from(vec!["a".to_string(), String::new()]));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(src.next_line().unwrap(), None);
    }

    #[test]
    fn mock_monitors_lists_one() {
        assert_eq!(MockMonitors.monitors().unwrap(), vec!["MOCK-1".to_string()]);
    }
}
