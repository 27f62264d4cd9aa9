//! Trace file reader.
//!
//! Traces use the valgrind `lackey` memory format, one event per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! The operation letter is the first non-blank character, followed by a
//! hexadecimal address (an `0x` prefix is accepted), a comma and a decimal
//! access size. Blank lines are skipped and anything after the size is ignored.
//! The first line that does not match ends the trace; events before it are
//! still replayed.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::data::{AccessEvent, AccessKind};
use crate::common::error::TraceError;

/// Parses a single non-blank trace line.
///
/// Returns `None` if the line is malformed.
pub fn parse_line(line: &str) -> Option<AccessEvent> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let op = chars.next()?;
    let rest = chars.as_str().trim_start();

    let (addr, rest) = rest.split_once(',')?;
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let address = u64::from_str_radix(hex, 16).ok()?;

    let rest = rest.trim_start();
    let digits = rest
        .strip_prefix('+')
        .unwrap_or(rest)
        .split(|c: char| !c.is_ascii_digit())
        .next()?;
    let size = digits.parse().ok()?;

    Some(AccessEvent::new(AccessKind::from_op(op), address, size))
}

/// Streams [`AccessEvent`]s from a line-oriented trace source.
///
/// Lines are read as raw bytes; a line that is not valid UTF-8 is malformed
/// and ends the trace like any other unparsable line.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(source) => {
                    self.done = true;
                    return Some(Err(TraceError::Read {
                        line: self.line_no + 1,
                        source,
                    }));
                }
            }
            self.line_no += 1;

            let Ok(line) = std::str::from_utf8(&self.buf) else {
                tracing::warn!(line = self.line_no, "trace line is not valid UTF-8, stopping");
                self.done = true;
                return None;
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Some(event) = parse_line(line) {
                return Some(Ok(event));
            }

            tracing::warn!(
                line = self.line_no,
                text = %line.trim_end(),
                "malformed trace line, stopping"
            );
            self.done = true;
        }
        None
    }
}
