/// Scoring configuration: every constant that feeds the score of a guess.
///
/// This is a versioned contract. Changing any value changes what a
/// historical `(hints_used, range_width)` pair would have scored, so bumps
/// here are breaking changes for score reproducibility.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Score achievable with zero hints and a width-1 range.
    pub base_potential: u32,

    /// Maximum score by number of hints used, monotonic non-increasing.
    /// Indexing clamps to the last entry when `hints_used` runs past it.
    pub max_scores_by_hints: Vec<u32>,

    /// Widest range (inclusive year count) eligible for any credit.
    pub max_range_width: u32,

    /// Cap on guesses and on range attempts per puzzle.
    pub max_guesses: usize,
}

impl ScoringConfig {
    pub const MAX_GUESSES: usize = 6;
    pub const BASE_POTENTIAL: u32 = 1000;
    pub const MAX_SCORES_BY_HINTS: [u32; 6] = [1000, 800, 600, 450, 300, 200];
    pub const MAX_RANGE_WIDTH: u32 = 100;

    pub fn new() -> Self {
        Self {
            base_potential: Self::BASE_POTENTIAL,
            max_scores_by_hints: Self::MAX_SCORES_BY_HINTS.to_vec(),
            max_range_width: Self::MAX_RANGE_WIDTH,
            max_guesses: Self::MAX_GUESSES,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new()
    }
}
