//! Session record storage.
//!
//! The session record is the only mutable shared resource in the system:
//! an append-only log of not-yet-persisted guesses, scoped to one puzzle
//! id. Stores return the updated record so callers can republish it on the
//! session feed. Recording against a different puzzle id discards the old
//! record first.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

use std::path::PathBuf;

use chronle_core::{RangeGuess, SessionRecord, Year};

use crate::error::Result;

/// Default on-disk location for the session file, under the platform data
/// directory.
pub fn default_session_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "chronle")
        .map(|dirs| dirs.data_dir().join("session.json"))
}

/// Storage contract for the ephemeral session record.
pub trait SessionStore: Send + Sync {
    /// Append a year guess for the given puzzle, resetting the record first
    /// if it belongs to a different puzzle.
    fn record_guess(&self, puzzle_id: &str, year: Year) -> Result<SessionRecord>;

    /// Append a range guess, with the same puzzle-id scoping rule.
    fn record_range(&self, puzzle_id: &str, range: RangeGuess) -> Result<SessionRecord>;

    /// Current record for the given puzzle. A stored record for a different
    /// puzzle reads as empty.
    fn snapshot(&self, puzzle_id: &str) -> Result<SessionRecord>;

    /// Explicitly discard the stored record.
    fn clear(&self) -> Result<()>;
}
