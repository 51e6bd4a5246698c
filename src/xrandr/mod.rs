//! X RandR-specific implementations.
//!
//! This module provides the concrete
//! [`MonitorSource`](crate::traits::MonitorSource) backend, powered by the
//! `xrandr` command-line tool.
//!
//! Nothing outside this module should reference RandR directly.

pub mod monitors;
