//! JSONL reading operations.
//!
//! This module provides async, line-by-line decoding of JSONL data with line
//! number tracking for error reporting. Blank lines are skipped but still
//! counted, so reported line numbers match what an editor shows.
//!
//! Lines are read as raw bytes. A line that is not valid UTF-8 is reported as
//! malformed like any other undecodable line instead of failing the stream.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::Result;
use crate::warning::Warning;

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader and decodes one JSON document per
/// line. It tracks line numbers so decoding failures can name the offending
/// line.
///
/// # Examples
///
/// ```no_run
/// use pkgflow_jsonl::JsonlReader;
/// use serde_json::Value;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = JsonlReader::new(tokio::io::stdin());
/// while let Some(entry) = reader.read_value_resilient::<Value>().await? {
///     match entry {
///         Ok(value) => println!("{value}"),
///         Err(warning) => eprintln!("{warning}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Current line number (1-based counting, 0 before any lines are read) for error reporting.
    line_number: usize,
    /// Raw bytes of the most recently read non-blank line, without terminator.
    line: Vec<u8>,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            line: Vec::new(),
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    ///
    /// Layout requests for large workspaces can run to hundreds of kilobytes
    /// on a single line; a larger buffer reduces the number of reads.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            line: Vec::new(),
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read. After reading, returns the
    /// 1-based line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next non-blank line into the internal buffer.
    ///
    /// Returns `false` at end of input.
    async fn advance(&mut self) -> Result<bool> {
        loop {
            self.line.clear();
            let read = self.reader.read_until(b'\n', &mut self.line).await?;
            if read == 0 {
                return Ok(false);
            }
            self.line_number += 1;

            while matches!(self.line.last(), Some(b'\n' | b'\r')) {
                self.line.pop();
            }

            if self.line.iter().all(u8::is_ascii_whitespace) {
                tracing::trace!(line = self.line_number, "Skipping blank line");
                continue;
            }
            return Ok(true);
        }
    }

    /// Reads and decodes the next value, reporting malformed lines as warnings.
    ///
    /// A malformed line, including one that is not valid UTF-8, yields
    /// `Some(Err(warning))` and leaves the reader positioned at the following
    /// line, so callers can keep consuming the stream.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Only IO failures are returned as errors.
    pub async fn read_value_resilient<T: DeserializeOwned>(
        &mut self,
    ) -> Result<Option<std::result::Result<T, Warning>>> {
        if !self.advance().await? {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.line).map_err(|e| {
            tracing::debug!(line = self.line_number, error = %e, "Malformed JSONL line");
            Warning::MalformedJson {
                line_number: self.line_number,
                error: e.to_string(),
            }
        })))
    }
}
