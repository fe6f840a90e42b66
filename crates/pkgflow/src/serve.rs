//! JSONL request loop for running the worker behind a pipe.
//!
//! Each input line is one [`LayoutRequest`]; each output line is the matching
//! [`WorkerResponse`], written and flushed before the next request is read.
//! A line that fails to decode gets an error response naming its line number
//! and the loop moves on, so a peer waiting on a reply is never left hanging.

use crate::domain::LayoutRequest;
use crate::error::Result;
use crate::worker::{LayoutHandle, WorkerResponse};
use pkgflow_jsonl::{JsonlReader, JsonlWriter, Warning};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// Initial read buffer; requests for large workspaces are long single lines.
const READ_BUFFER_CAPACITY: usize = 64 * 1024;

/// Totals for one serve session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServeSummary {
    /// Requests answered with a layout
    pub succeeded: usize,
    /// Decoded requests whose layout failed
    pub failed: usize,
    /// One entry per line that could not be decoded, in input order
    pub warnings: Vec<Warning>,
}

impl ServeSummary {
    /// Number of lines that could not be decoded.
    #[must_use]
    pub fn malformed(&self) -> usize {
        self.warnings.len()
    }

    /// Total responses written.
    #[must_use]
    pub fn responses(&self) -> usize {
        self.succeeded + self.failed + self.malformed()
    }
}

/// Answer every request on `input` until end of stream.
///
/// # Errors
///
/// Returns an error only if reading `input` or writing `output` fails.
pub async fn serve<R, W>(input: R, output: W, handle: &LayoutHandle) -> Result<ServeSummary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = JsonlReader::with_capacity(input, READ_BUFFER_CAPACITY);
    let mut writer = JsonlWriter::new(output);
    let mut summary = ServeSummary::default();

    while let Some(entry) = reader.read_value_resilient::<LayoutRequest>().await? {
        let response = match entry {
            Ok(request) => {
                debug!(
                    line = reader.line_number(),
                    nodes = request.nodes.len(),
                    edges = request.edges.len(),
                    "Received layout request"
                );
                let response = handle.respond(request).await;
                if response.is_ok() {
                    summary.succeeded += 1;
                } else {
                    summary.failed += 1;
                }
                response
            }
            Err(warning) => {
                warn!(line = warning.line_number(), %warning, "Rejecting malformed request");
                let response = WorkerResponse::failure(None, warning.to_string());
                summary.warnings.push(warning);
                response
            }
        };

        writer.write(&response).await?;
        writer.flush().await?;
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        malformed = summary.malformed(),
        "Input closed"
    );
    Ok(summary)
}
