//! Immutable snapshots of the four input sources.
//!
//! Each source loads independently and in its own time; the runtime takes a
//! snapshot of all four whenever any of them changes and hands it to
//! [`derive`](crate::engine::derive). The engine never talks to a source
//! directly.

use super::{ProgressRecord, Puzzle, RangeGuess, SessionRecord, Year};

/// Puzzle definition source: the puzzle itself, or a loading/error signal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleSource {
    pub puzzle: Option<Puzzle>,
    pub is_loading: bool,
    /// Display text, not a typed error code.
    pub error: Option<String>,
}

impl PuzzleSource {
    pub fn loading() -> Self {
        Self {
            puzzle: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn ready(puzzle: Puzzle) -> Self {
        Self {
            puzzle: Some(puzzle),
            is_loading: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            puzzle: None,
            is_loading: false,
            error: Some(message.into()),
        }
    }
}

/// Authentication identity source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthSource {
    pub user_id: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthSource {
    pub fn loading() -> Self {
        Self {
            user_id: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            is_authenticated: false,
            is_loading: false,
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_authenticated: true,
            is_loading: false,
        }
    }
}

/// Server-persisted progress source for the authenticated user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSource {
    pub progress: Option<ProgressRecord>,
    pub is_loading: bool,
}

impl ProgressSource {
    pub fn loading() -> Self {
        Self {
            progress: None,
            is_loading: true,
        }
    }

    pub fn ready(progress: Option<ProgressRecord>) -> Self {
        Self {
            progress,
            is_loading: false,
        }
    }
}

/// Read-only view of the session record at derivation time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub session_guesses: Vec<Year>,
    pub session_ranges: Vec<RangeGuess>,
}

impl From<&SessionRecord> for SessionSnapshot {
    fn from(record: &SessionRecord) -> Self {
        Self {
            session_guesses: record.session_guesses.clone(),
            session_ranges: record.session_ranges.clone(),
        }
    }
}

/// All four sources, captured at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSnapshots {
    pub puzzle: PuzzleSource,
    pub auth: AuthSource,
    pub progress: ProgressSource,
    pub session: SessionSnapshot,
}

impl SourceSnapshots {
    /// Initial snapshot: everything still loading, session empty.
    pub fn loading() -> Self {
        Self {
            puzzle: PuzzleSource::loading(),
            auth: AuthSource::loading(),
            progress: ProgressSource::loading(),
            session: SessionSnapshot::default(),
        }
    }
}
