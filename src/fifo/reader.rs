//! Named-pipe [`LineSource`] implementation.
//!
//! Opens the status pipe and hands out one line at a time.  When every
//! writer has closed a FIFO the reader sees end-of-stream; instead of
//! treating that as the end of input it re-opens the pipe, which blocks
//! until the next writer connects.  A regular file is read once.

use crate::traits::LineSource;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// A [`LineSource`] reading from a named pipe (or a plain file).
pub struct FifoSource {
    path: PathBuf,
    reader: BufReader<File>,
    reopen: bool,
}

/// Errors produced by the pipe reader.
#[derive(Debug, thiserror::Error)]
pub enum FifoError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FifoSource {
    /// Open `path`.
    ///
    /// Opening a FIFO blocks until a writer connects.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FifoError> {
        let path = path.as_ref().to_path_buf();
        let reopen = std::fs::metadata(&path)
            .map(|m| m.file_type().is_fifo())
            .unwrap_or(false);
        let file = open_file(&path)?;
        info!("reading status lines from {}", path.display());
        Ok(Self {
            path,
            reader: BufReader::new(file),
            reopen,
        })
    }

    /// The filesystem path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_file(path: &Path) -> Result<File, FifoError> {
    File::open(path).map_err(|source| FifoError::Open {
        path: path.to_path_buf(),
        source,
    })
}

impl LineSource for FifoSource {
    type Error = FifoError;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        let mut buf = Vec::new();
        loop {
            if self.reader.read_until(b'\n', &mut buf)? > 0 {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                return Ok(Some(into_text(buf)));
            }
            if !self.reopen {
                return Ok(None);
            }
            debug!("all writers closed {}, reopening", self.path.display());
            self.reader = BufReader::new(open_file(&self.path)?);
        }
    }
}

/// Window titles are not guaranteed to be UTF-8; invalid bytes become
/// U+FFFD rather than failing the read.
fn into_text(buf: Vec<u8>) -> String {
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(e) => {
            warn!("replacing invalid UTF-8 in input line: {}", e.utf8_error());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

//  Tests
