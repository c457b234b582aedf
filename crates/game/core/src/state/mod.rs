//! Canonical game data types.
//!
//! Everything here is plain data: puzzles and progress records are owned by
//! external persistence and read-only to the engine, session records are the
//! one mutable resource (owned by the runtime), and [`GameState`] is the
//! derived output that is recomputed on every source change.

mod game_state;
mod guess;
mod progress;
mod puzzle;
mod session;
mod sources;

pub use game_state::{GameState, ReadyState};
pub use guess::{RangeGuess, Year};
pub use progress::ProgressRecord;
pub use puzzle::Puzzle;
pub use session::SessionRecord;
pub use sources::{AuthSource, ProgressSource, PuzzleSource, SessionSnapshot, SourceSnapshots};
