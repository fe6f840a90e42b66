//! Async JSON Lines framing for the pkgflow layout protocol.
//!
//! Requests and responses cross the worker's process boundary one JSON
//! document per line. This crate provides the buffered reader and writer for
//! that framing, plus the [`Warning`] type used to report lines that could
//! not be decoded without aborting the stream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod warning;
pub mod writer;

pub use error::{Error, Result};
pub use reader::JsonlReader;
pub use warning::Warning;
pub use writer::JsonlWriter;
