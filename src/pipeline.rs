//! The two halves of the running pipeline.
//!
//! * [`ingest`] runs on a background thread: it pulls lines from a
//!   [`LineSource`], feeds them to the [`StatusLine`] and pushes the
//!   composed lines into the dispatch channel.
//! * [`emit`] runs on the main thread: it drains the channel into the
//!   output sink (stdout in production).
//!
//! The ingestion thread is the only sender and the output loop the only
//! receiver, so lines come out in exactly the order they were composed.
//! [`run`] wires the two together and reports how the pipeline ended.

use crate::diagnostics::Stats;
use crate::status::{Outcome, StatusLine};
use crate::traits::LineSource;
use log::{info, warn};
use std::io::Write;
use std::sync::{mpsc, Arc};

/// Why the pipeline stopped abnormally.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError<E: std::error::Error + 'static> {
    /// Reading the input failed.
    #[error("input error: {0}")]
    Input(#[source] E),
    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    /// The ingestion thread panicked.
    #[error("ingestion thread panicked")]
    Panicked,
}

/// Run ingestion on a background thread and [`emit`] into `out` on the
/// calling thread until the input ends.
///
/// A clean end of input yields `Ok(())`.  On an output failure the
/// ingestion thread is not joined, since it may be blocked on a read.
pub fn run<S, W>(
    source: S,
    status: StatusLine,
    out: W,
    stats: Arc<Stats>,
) -> Result<(), PipelineError<S::Error>>
where
    S: LineSource + 'static,
    W: Write,
{
    let (line_tx, line_rx) = mpsc::channel::<String>();
    let ingestion = {
        let stats = stats.clone();
        std::thread::spawn(move || ingest(source, status, line_tx, &stats))
    };

    emit(line_rx, out, &stats)?;

    match ingestion.join() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(PipelineError::Input(e)),
        Err(_) => Err(PipelineError::Panicked),
    }
}

/// Read `source` until it is exhausted, sending composed lines to `sink`.
///
/// Malformed snapshots are logged and skipped.  Returns when the source
/// ends, when it fails, or when the receiving side has gone away.
pub fn ingest<S: LineSource>(
    mut source: S,
    mut status: StatusLine,
    sink: mpsc::Sender<String>,
    stats: &Stats,
) -> Result<(), S::Error> {
    stats.set_monitors(status.store().len());
    while let Some(line) = source.next_line()? {
        stats.line_read();
        let lines = match status.handle(&line) {
            Ok(Outcome::Skipped) => continue,
            Ok(Outcome::Clock(lines)) => {
                stats.clock_updated();
                lines
            }
            Ok(Outcome::Snapshot(lines)) => {
                stats.snapshot_applied();
                stats.set_monitors(status.store().len());
                lines
            }
            Err(e) => {
                stats.decode_failed();
                warn!("discarding line: {}", e);
                continue;
            }
        };
        for line in lines {
            if sink.send(line).is_err() {
                info!("output closed, stopping ingestion");
                return Ok(());
            }
        }
    }
    info!("input exhausted");
    Ok(())
}

/// Write every received line to `out`, one per line, flushing after each.
///
/// Returns once all senders are gone.
pub fn emit<W: Write>(lines: mpsc::Receiver<String>, mut out: W, stats: &Stats) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
        out.flush()?;
        stats.line_emitted();
    }
    Ok(())
}

//  Tests
