//! Deterministic derivation and scoring engine for the daily year-guessing
//! game.
//!
//! `chronle-core` reconciles four independently-loading sources (puzzle
//! definition, auth identity, server progress, local session guesses) into
//! one [`state::GameState`] through the pure [`engine::derive`] function,
//! and converts range submissions into points through the deterministic
//! [`engine::score_range`]. The crate performs no I/O and keeps no clocks;
//! the runtime crate owns all reactive wiring and side effects.

pub mod config;
pub mod engine;
pub mod state;

pub use config::ScoringConfig;
pub use engine::{
    DeriveError, FAILED_TO_LOAD_PUZZLE, NO_PUZZLE_AVAILABLE, RangeScore, derive, merge_ranges,
    reconcile, score_range,
};
pub use state::{
    AuthSource, GameState, ProgressRecord, ProgressSource, Puzzle, PuzzleSource, RangeGuess,
    ReadyState, SessionRecord, SessionSnapshot, SourceSnapshots, Year,
};
