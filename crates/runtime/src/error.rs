//! Unified error types surfaced by the runtime.
//!
//! Wraps failures from session stores, the progress boundary, and the
//! puzzle library so clients can bubble them up with consistent context.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session store lock poisoned")]
    LockPoisoned,

    #[error("session store I/O failed")]
    Io(#[from] std::io::Error),

    #[error("session record serialization failed")]
    SessionEncoding(#[source] serde_json::Error),

    #[error("malformed progress payload")]
    MalformedProgress(#[source] serde_json::Error),

    #[error("progress record serialization failed")]
    ProgressEncoding(#[source] serde_json::Error),

    #[error("malformed puzzle library: {reason}")]
    MalformedLibrary { reason: String },

    #[error("invalid year key in puzzle library: {key:?}")]
    InvalidYearKey { key: String },

    #[error("puzzle library is empty")]
    EmptyLibrary,

    #[error("no puzzle in library for year {year}")]
    UnknownYear { year: chronle_core::Year },
}
