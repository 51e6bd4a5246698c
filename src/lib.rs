//! **fvwm3-status** — a lemonbar status-line generator for FVWM3.
//!
//! FVWM3 writes desktop-state snapshots (JSON) and clock updates
//! (`clock:<text>`) into a named pipe.  This crate turns that stream into
//! one markup line per monitor, re-emitted on every update, for a status
//! bar process reading our standard output.
//!
//! # Architecture
//!
//! ```text
//! pipe ─► LineSource ─► StatusLine::handle ─► mpsc ─► emit ─► stdout
//!                        │ classify
//!                        │ decode
//!                        │ render (per monitor)
//!                        └ FragmentStore + clock ─► compose
//! ```
//!
//! The crate is organised around two traits:
//!
//! * [`traits::LineSource`] — where raw lines come from (the FIFO reader
//!   in [`fifo`], or an in-memory script in tests).
//! * [`traits::MonitorSource`] — startup monitor enumeration (`xrandr` in
//!   [`xrandr`]).
//!
//! [`render`] is a pure function; all mutable state lives in
//! [`status::StatusLine`], owned by the ingestion thread.

pub mod config;
pub mod diagnostics;
pub mod fifo;
pub mod message;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod snapshot;
pub mod status;
pub mod store;
pub mod traits;
pub mod xrandr;
