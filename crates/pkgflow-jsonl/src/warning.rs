//! Warning types for non-fatal errors during JSONL processing.
//!
//! A long-lived stream such as the layout worker's stdin must survive a bad
//! line. The [`Warning`] type describes such a line so the stream owner can
//! answer it and report a summary when the stream ends.
//!
//! # Examples
//!
//! ```
//! use pkgflow_jsonl::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! };
//! assert_eq!(warning.line_number(), 5);
//! assert_eq!(warning.to_string(), "line 5: malformed JSON: unexpected end of input");
//! ```

use std::fmt;

/// A non-fatal warning that occurred during JSONL processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line could not be decoded: invalid UTF-8, malformed JSON, or JSON
    /// of the wrong shape.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the decoding error.
        error: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
        }
    }
}
