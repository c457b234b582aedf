use super::{Puzzle, RangeGuess, Year};

/// The single derived source of truth for one puzzle attempt.
///
/// A tagged union rather than a struct of optionals, so consumers are forced
/// to handle every loading and error case exhaustively. Derivation produces
/// a fresh value on every source change; nothing here is mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Puzzle definition has not arrived yet.
    LoadingPuzzle,
    /// Puzzle is in, authentication identity is still resolving.
    LoadingAuth,
    /// Authenticated and waiting on server-persisted progress.
    LoadingProgress,
    /// Terminal for the current render; `message` is plain display text.
    Error { message: String },
    Ready(ReadyState),
}

/// Fully-derived playable state. All invariants documented on the fields
/// hold whenever a value of this type exists.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadyState {
    pub puzzle: Puzzle,

    /// Merged year guesses: server entries first, then de-duplicated session
    /// entries, at most `MAX_GUESSES` in total.
    pub guesses: Vec<Year>,

    /// Merged range guesses, same ordering rule and cap. When neither side
    /// carries explicit ranges these are degenerate single-point ranges
    /// synthesized from `guesses`.
    pub ranges: Vec<RangeGuess>,

    /// Server-provided total when present, else the sum of range scores.
    pub total_score: u32,

    pub is_complete: bool,
    pub has_won: bool,

    pub remaining_guesses: u32,
    pub remaining_attempts: u32,

    /// Maximum `hints_used` across all ranges. Hints stay revealed.
    pub hints_revealed: u32,
}

impl GameState {
    /// Stable tag for logging and display.
    pub fn status(&self) -> &'static str {
        match self {
            GameState::LoadingPuzzle => "loading-puzzle",
            GameState::LoadingAuth => "loading-auth",
            GameState::LoadingProgress => "loading-progress",
            GameState::Error { .. } => "error",
            GameState::Ready(_) => "ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, GameState::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&ReadyState> {
        match self {
            GameState::Ready(ready) => Some(ready),
            _ => None,
        }
    }
}
