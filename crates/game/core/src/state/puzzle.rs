use super::Year;

/// A daily puzzle definition. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub id: String,

    /// The year to guess. BC years are negative.
    pub target_year: Year,

    /// Ordered hint texts; index is reveal order. The first event is shown
    /// up front, the rest are optional reveals with a scoring cost.
    pub events: Vec<String>,

    /// Sequential number of the puzzle in the daily series.
    pub puzzle_number: u32,
}

impl Puzzle {
    pub fn new(
        id: impl Into<String>,
        target_year: Year,
        events: Vec<String>,
        puzzle_number: u32,
    ) -> Self {
        Self {
            id: id.into(),
            target_year,
            events,
            puzzle_number,
        }
    }

    /// Number of hints that can be revealed beyond the free opening event.
    pub fn optional_hints(&self) -> u32 {
        self.events.len().saturating_sub(1) as u32
    }
}
