use super::{RangeGuess, Year};

/// Local, ephemeral guesses not yet confirmed persisted to the server.
///
/// Scoped to one puzzle id: recording against a different puzzle discards
/// the old record. Append operations are monotonic; the runtime serializes
/// submissions so the engine never observes a record mid-mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    pub puzzle_id: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub session_guesses: Vec<Year>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub session_ranges: Vec<RangeGuess>,
}

impl SessionRecord {
    pub fn new(puzzle_id: impl Into<String>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            session_guesses: Vec::new(),
            session_ranges: Vec::new(),
        }
    }

    pub fn add_guess(&mut self, year: Year) {
        self.session_guesses.push(year);
    }

    pub fn add_range(&mut self, range: RangeGuess) {
        self.session_ranges.push(range);
    }

    pub fn clear_guesses(&mut self) {
        self.session_guesses.clear();
    }

    pub fn clear_ranges(&mut self) {
        self.session_ranges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.session_guesses.is_empty() && self.session_ranges.is_empty()
    }
}
