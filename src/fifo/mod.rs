//! Input channel: the named pipe FVWM3 writes status lines to.
//!
//! FVWM3 (or a helper script) writes newline-delimited JSON snapshots and
//! `clock:` lines into the pipe.

pub mod reader;
