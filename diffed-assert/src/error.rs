//! Errors raised while evaluating an assertion.

use core::fmt;
use std::io;

/// Which of the two compared expressions a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first (left, or "expected") expression.
    Left,
    /// The second (right, or "actual") expression.
    Right,
}

impl Side {
    /// The 1-based position of this side in the assertion call.
    pub const fn position(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

/// A harness-level failure: the assertion could not be carried out.
///
/// A genuine mismatch between the compared values is not an `Error`, see
/// [`Failure::Mismatch`](crate::Failure::Mismatch).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Evaluating one of the deferred expressions failed.
    #[error("expression {side} failed: {message}")]
    Expression {
        /// The expression that failed.
        side: Side,
        /// The rendered error produced by the expression.
        message: String,
    },

    /// A value could not be encoded as JSON.
    #[cfg(feature = "json")]
    #[error("failed to encode value as JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The input was not valid UTF-8.
    #[cfg(feature = "json")]
    #[error("failed to UTF8-decode {input} JSON: {source}")]
    InvalidUtf8 {
        /// Which input failed to decode.
        input: &'static str,
        /// The underlying decoding error.
        #[source]
        source: core::str::Utf8Error,
    },

    /// The input was UTF-8 but not valid JSON.
    #[cfg(feature = "json")]
    #[error("failed to parse {input} JSON: {source}")]
    InvalidJson {
        /// Which input failed to parse.
        input: &'static str,
        /// The underlying parse error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A serialized value could not be staged for the diff engine.
    #[error("failed to stage diff input {index}: {source}")]
    Staging {
        /// Which input (1 or 2) could not be staged.
        index: u8,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The diff engine could not produce a result.
    #[error("failed to diff: {reason}")]
    DiffFailed {
        /// What went wrong.
        reason: String,
    },

    /// The values compare unequal but their serialized forms are identical,
    /// so there is no diff to show.
    #[error("values are not equal, but their serialized forms are identical")]
    DegenerateMismatch,
}

impl Error {
    pub(crate) fn diff_failed(reason: impl Into<String>) -> Self {
        Error::DiffFailed {
            reason: reason.into(),
        }
    }
}
