use super::{RangeGuess, Year};

/// Server-persisted progress for one user and one puzzle.
///
/// Owned by external persistence and read-only to the engine. Payloads from
/// the wire are duck-typed; the runtime validates them into this shape
/// before they ever reach derivation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub guesses: Vec<Year>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub ranges: Vec<RangeGuess>,

    /// Authoritative total when the server has computed one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_score: Option<u32>,

    /// Completion time in unix milliseconds. `None` means in progress;
    /// `Some` is terminal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed_at: Option<i64>,
}

impl ProgressRecord {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
