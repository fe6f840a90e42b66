//! Layout worker boundary.
//!
//! The layout pipeline runs inside a dedicated tokio task that owns the
//! receiving end of a bounded MPSC channel. Callers hold a cloneable
//! [`LayoutHandle`] and exchange owned messages with the worker; nothing is
//! shared between the two sides.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Caller tasks             │  Worker task                         │
//! │  ────────────             │  ───────────                         │
//! │  handle.layout(request) ──┼→ recv() jobs in arrival order        │
//! │  await oneshot reply      │  compute_layout on blocking pool     │
//! │  ...                      │  panics become error replies         │
//! │  drop handles             │  channel closed: return WorkerStats  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are processed strictly one at a time, in the order they were
//! submitted. A request whose caller has already gone away is skipped.

use crate::config::LayoutConfig;
use crate::domain::{LayoutRequest, LayoutResult};
use crate::error::{Error, Result};
use crate::layout::compute_layout;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, trace, warn};

/// Default number of requests that may wait for the worker.
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

/// The computation a worker runs for each request.
type LayoutFn = fn(&LayoutRequest, &LayoutConfig) -> Result<LayoutResult>;

/// A queued request and the channel its result goes back on.
struct Job {
    request: LayoutRequest,
    reply: oneshot::Sender<Result<LayoutResult>>,
}

/// Counters reported when the worker stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Requests that produced a layout
    pub completed: usize,
    /// Requests that ended in an error, including panics
    pub failed: usize,
    /// Requests whose caller stopped waiting
    pub abandoned: usize,
}

/// Owner of the background layout task.
///
/// Dropping every [`LayoutHandle`] (including the one held here) closes the
/// channel; the worker finishes the jobs already queued and then exits.
pub struct LayoutWorker {
    handle: LayoutHandle,
    task: JoinHandle<WorkerStats>,
}

impl LayoutWorker {
    /// Spawn a worker with the default queue depth.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(config: LayoutConfig) -> Self {
        Self::with_queue_depth(config, DEFAULT_QUEUE_DEPTH)
    }

    /// Spawn a worker that buffers at most `queue_depth` pending requests.
    ///
    /// # Panics
    ///
    /// Panics if `queue_depth` is 0.
    #[must_use]
    pub fn with_queue_depth(config: LayoutConfig, queue_depth: usize) -> Self {
        Self::spawn_with(config, queue_depth, compute_layout)
    }

    fn spawn_with(config: LayoutConfig, queue_depth: usize, layout: LayoutFn) -> Self {
        assert!(queue_depth > 0, "queue_depth must be at least 1");

        let (sender, receiver) = mpsc::channel(queue_depth);
        let task = tokio::spawn(run(Arc::new(config), receiver, layout));

        Self {
            handle: LayoutHandle { sender },
            task,
        }
    }

    /// A new handle for submitting requests.
    #[must_use]
    pub fn handle(&self) -> LayoutHandle {
        self.handle.clone()
    }

    /// Release this worker's handle and wait for the task to drain.
    ///
    /// Returns once every other handle has been dropped and all queued jobs
    /// are answered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutPanicked`] if the worker task itself failed.
    pub async fn shutdown(self) -> Result<WorkerStats> {
        drop(self.handle);
        self.task
            .await
            .map_err(|e| Error::LayoutPanicked(join_error_message(e)))
    }
}

/// Cloneable sender side of the worker boundary.
#[derive(Debug, Clone)]
pub struct LayoutHandle {
    sender: mpsc::Sender<Job>,
}

impl LayoutHandle {
    /// Submit `request` and wait for its layout.
    ///
    /// Waits for queue space if the worker is saturated.
    ///
    /// # Errors
    ///
    /// Returns the layout's own error, or [`Error::WorkerUnavailable`] if the
    /// worker has stopped.
    pub async fn layout(&self, request: LayoutRequest) -> Result<LayoutResult> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Job { request, reply })
            .await
            .map_err(|_| Error::WorkerUnavailable)?;
        response.await.map_err(|_| Error::WorkerUnavailable)?
    }

    /// Submit `request` and wrap the outcome in a wire envelope.
    ///
    /// Never fails: every error becomes [`WorkerResponse::Error`].
    pub async fn respond(&self, request: LayoutRequest) -> WorkerResponse {
        let request_id = request.request_id.clone();
        match self.layout(request).await {
            Ok(result) => WorkerResponse::success(request_id, result),
            Err(e) => WorkerResponse::failure(request_id, e.to_string()),
        }
    }
}

/// One response line of the worker protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WorkerResponse {
    /// The layout was computed.
    Ok {
        /// Correlation id copied from the request
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        /// The computed layout
        #[serde(flatten)]
        result: LayoutResult,
    },

    /// The layout could not be computed.
    Error {
        /// Correlation id copied from the request, when it could be read
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        /// Human-readable failure description
        message: String,
    },
}

impl WorkerResponse {
    /// Successful response.
    #[must_use]
    pub fn success(request_id: Option<String>, result: LayoutResult) -> Self {
        Self::Ok { request_id, result }
    }

    /// Failure response.
    #[must_use]
    pub fn failure(request_id: Option<String>, message: impl Into<String>) -> Self {
        Self::Error {
            request_id,
            message: message.into(),
        }
    }

    /// Returns `true` for a successful response.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Correlation id, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Ok { request_id, .. } | Self::Error { request_id, .. } => request_id.as_deref(),
        }
    }

    /// Convert into the layout or the failure message.
    ///
    /// # Errors
    ///
    /// Returns the message of an [`WorkerResponse::Error`].
    pub fn into_result(self) -> std::result::Result<LayoutResult, String> {
        match self {
            Self::Ok { result, .. } => Ok(result),
            Self::Error { message, .. } => Err(message),
        }
    }
}

/// Worker loop: answer jobs in arrival order until every sender is gone.
async fn run(
    config: Arc<LayoutConfig>,
    mut receiver: mpsc::Receiver<Job>,
    layout: LayoutFn,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    while let Some(Job { request, reply }) = receiver.recv().await {
        if reply.is_closed() {
            trace!("Skipping request whose caller stopped waiting");
            stats.abandoned += 1;
            continue;
        }

        let nodes = request.nodes.len();
        let config = Arc::clone(&config);
        let result = match tokio::task::spawn_blocking(move || layout(&request, &config)).await {
            Ok(result) => result,
            Err(join_error) => Err(Error::LayoutPanicked(join_error_message(join_error))),
        };

        match &result {
            Ok(_) => stats.completed += 1,
            Err(e) => {
                warn!(error = %e, nodes, "Layout request failed");
                stats.failed += 1;
            }
        }

        if reply.send(result).is_err() {
            debug!(nodes, "Caller dropped before the layout completed");
            stats.abandoned += 1;
        }
    }

    debug!(
        completed = stats.completed,
        failed = stats.failed,
        abandoned = stats.abandoned,
        "Layout worker stopped"
    );
    stats
}

fn join_error_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(err) => err.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("layout panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("layout panicked: {s}")
    } else {
        "layout panicked with unknown payload".to_string()
    }
}
