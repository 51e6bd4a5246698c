//! Optional diagnostics endpoint.
//!
//! When enabled (`FRS_PROFILE=1`), a background thread answers every HTTP
//! request on the configured address with the pipeline counters as JSON:
//!
//! ```json
//! {"lines_read":120,"snapshots":80,"clock_updates":39,"decode_errors":1,"lines_emitted":238,"monitors":2}
//! ```

use log::{debug, error, info};
use serde::Serialize;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long a client may take to send its request head.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Pipeline counters, updated by the ingestion and output threads.
#[derive(Debug, Default)]
pub struct Stats {
    lines_read: AtomicU64,
    snapshots: AtomicU64,
    clock_updates: AtomicU64,
    decode_errors: AtomicU64,
    lines_emitted: AtomicU64,
    monitors: AtomicU64,
}

/// A point-in-time copy of [`Stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub lines_read: u64,
    pub snapshots: u64,
    pub clock_updates: u64,
    pub decode_errors: u64,
    pub lines_emitted: u64,
    pub monitors: u64,
}

impl Stats {
    pub fn line_read(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot_applied(&self) {
        self.snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub fn clock_updated(&self) {
        self.clock_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn line_emitted(&self) {
        self.lines_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_monitors(&self, count: usize) {
        self.monitors.store(count as u64, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            snapshots: self.snapshots.load(Ordering::Relaxed),
            clock_updates: self.clock_updates.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            lines_emitted: self.lines_emitted.load(Ordering::Relaxed),
            monitors: self.monitors.load(Ordering::Relaxed),
        }
    }
}

/// Errors produced by the diagnostics endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal HTTP server exposing [`Stats`].
///
/// Requests are served one at a time; a client that stalls is dropped after
/// the read timeout so it cannot block the others.
pub struct DiagnosticsServer {
    listener: TcpListener,
    stats: Arc<Stats>,
    read_timeout: Duration,
}

impl DiagnosticsServer {
    /// Bind to `addr`.  Port `0` picks a free port.
    pub fn bind(addr: SocketAddr, stats: Arc<Stats>) -> Result<Self, DiagnosticsError> {
        let listener =
            TcpListener::bind(addr).map_err(|source| DiagnosticsError::Bind { addr, source })?;
        Ok(Self {
            listener,
            stats,
            read_timeout: DEFAULT_READ_TIMEOUT,
        })
    }

    /// Override [`DEFAULT_READ_TIMEOUT`].
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr, DiagnosticsError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests one at a time.
    ///
    /// This method **blocks** indefinitely.  Run it on a dedicated thread.
    pub fn run(self) {
        if let Ok(addr) = self.listener.local_addr() {
            info!("diagnostics listening on http://{}", addr);
        }
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.respond(stream) {
                        error!("diagnostics request failed: {}", e);
                    }
                }
                Err(e) => error!("diagnostics accept error: {}", e),
            }
        }
    }

    fn respond(&self, stream: TcpStream) -> Result<(), DiagnosticsError> {
        stream.set_read_timeout(Some(self.read_timeout))?;
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        debug!("diagnostics request: {}", request_line.trim_end());
        // Drain headers up to the blank line.
        loop {
            let mut header = String::new();
            if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
                break;
            }
        }

        let body = serde_json::to_string(&self.stats.snapshot())?;
        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )?;
        stream.flush()?;
        Ok(())
    }
}

//  Tests
