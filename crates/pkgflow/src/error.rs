//! Error types for pkgflow operations.
//!
//! Cycles and dangling edges are not errors: the layout pipeline absorbs
//! them and reports them in its output. The variants below cover failures
//! that prevent a layout from being produced at all.

use std::io;
use thiserror::Error;

/// The error type for pkgflow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the JSONL transport.
    #[error("Transport error: {0}")]
    Transport(#[from] pkgflow_jsonl::Error),

    /// The request exceeds the configured node ceiling.
    #[error("Graph too large: {nodes} nodes exceeds the limit of {limit}")]
    GraphTooLarge {
        /// Number of nodes in the request.
        nodes: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// The layout worker has shut down or dropped the request.
    #[error("Layout worker is not running")]
    WorkerUnavailable,

    /// The layout computation panicked.
    #[error("Graph layout failed: {0}")]
    LayoutPanicked(String),
}

/// A specialized Result type for pkgflow operations.
pub type Result<T> = std::result::Result<T, Error>;
