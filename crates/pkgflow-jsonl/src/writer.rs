//! JSONL writing operations.
//!
//! This module provides async functionality for writing data in JSONL format
//! with efficient buffering.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::Result;

/// Async writer for JSONL (JSON Lines) data.
///
/// Each value is serialized to a single line followed by a newline
/// character. Output is buffered; call [`flush`](Self::flush) when the peer
/// needs to see a record immediately, as the serve loop does after every
/// response.
///
/// # Examples
///
/// ```no_run
/// use pkgflow_jsonl::JsonlWriter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut writer = JsonlWriter::new(tokio::io::stdout());
/// writer.write(&serde_json::json!({"status": "ok"})).await?;
/// writer.flush().await?;
/// # Ok(())
/// # }
/// ```
pub struct JsonlWriter<W> {
    /// Buffered writer wrapping the underlying async writer.
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> JsonlWriter<W> {
    /// Creates a new `JsonlWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Serializes `value` as one line of JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub async fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        Ok(())
    }

    /// Flushes buffered records to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_one_line_per_record() {
        let mut out = Vec::new();
        let mut writer = JsonlWriter::new(&mut out);
        writer.write(&json!({"a": 1})).await.unwrap();
        writer.write(&json!([1, 2])).await.unwrap();
        writer.flush().await.unwrap();
        drop(writer);

        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n[1,2]\n");
    }

    #[tokio::test]
    async fn embedded_newlines_are_escaped() {
        let mut out = Vec::new();
        let mut writer = JsonlWriter::new(&mut out);
        writer.write(&json!({"text": "two\nlines"})).await.unwrap();
        writer.flush().await.unwrap();
        drop(writer);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[tokio::test]
    async fn nothing_reaches_the_sink_before_flush() {
        let mut out = Vec::new();
        let mut writer = JsonlWriter::new(&mut out);
        writer.write(&json!({"status": "ok"})).await.unwrap();
        drop(writer);

        assert!(out.is_empty());
    }
}
