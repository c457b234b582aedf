/// A calendar year. BC years are negative (`-44` is 44 BC).
pub type Year = i32;

/// A submitted year-range guess.
///
/// A plain year guess is the degenerate case `start == end`. The score is
/// fixed at submission time and stored with the range, so historical totals
/// stay reproducible even if the scoring table changes later.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeGuess {
    pub start: Year,
    pub end: Year,

    /// Number of hints revealed before this range was submitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hints_used: u32,

    /// Points awarded at submission time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: u32,

    /// Submission time in unix milliseconds; 0 when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: i64,
}

impl RangeGuess {
    pub fn new(start: Year, end: Year, hints_used: u32, score: u32, timestamp: i64) -> Self {
        Self {
            start,
            end,
            hints_used,
            score,
            timestamp,
        }
    }

    /// Degenerate single-point range synthesized from a legacy year guess.
    pub fn point(year: Year) -> Self {
        Self::new(year, year, 0, 0, 0)
    }

    /// Inclusive width of the range. `start > end` yields 0.
    pub fn width(&self) -> u32 {
        if self.start > self.end {
            return 0;
        }
        (i64::from(self.end) - i64::from(self.start) + 1).min(u32::MAX.into()) as u32
    }

    /// Whether the target year falls inside the range (inclusive).
    pub fn contains(&self, target: Year) -> bool {
        self.start <= target && target <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_inclusive() {
        assert_eq!(RangeGuess::point(1969).width(), 1);
        assert_eq!(RangeGuess::new(1960, 1969, 0, 0, 0).width(), 10);
    }

    #[test]
    fn width_of_inverted_range_is_zero() {
        assert_eq!(RangeGuess::new(1970, 1960, 0, 0, 0).width(), 0);
    }

    #[test]
    fn containment_is_inclusive_on_both_ends() {
        let range = RangeGuess::new(-50, -40, 0, 0, 0);
        assert!(range.contains(-50));
        assert!(range.contains(-44));
        assert!(range.contains(-40));
        assert!(!range.contains(-39));
    }
}
