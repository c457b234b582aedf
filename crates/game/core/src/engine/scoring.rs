//! Deterministic range scoring.
//!
//! Every arithmetic step that reaches the stored score is integer-only, so
//! the same `(hints_used, range_width, contained)` triple produces a
//! bit-identical score on every platform and every run. The fractional
//! width factor is reported for display but never feeds the score.

use crate::config::ScoringConfig;

/// Breakdown of one scored range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeScore {
    /// Points awarded. Zero unless the range contains the target.
    pub score: u32,

    /// Points forfeited to hint reveals: `base_potential - capped_score`.
    pub hint_penalty: u32,

    /// Width credit in `[0, 1]`; display only.
    pub width_factor: f64,
}

/// Score a single range submission.
///
/// `capped_score` comes from the hint table, clamped to its last entry when
/// `hints_used` runs past it. Width credit is the rational
/// `clamp(W_MAX - width + 1, 0, W_MAX) / W_MAX`; the awarded score is
/// `capped_score * numerator / W_MAX` in integer division, which is exactly
/// `floor(capped_score * width_factor)`.
pub fn score_range(
    config: &ScoringConfig,
    hints_used: u32,
    range_width: u32,
    contained: bool,
) -> RangeScore {
    let last = config.max_scores_by_hints.len().saturating_sub(1);
    let capped_score = config
        .max_scores_by_hints
        .get((hints_used as usize).min(last))
        .copied()
        .unwrap_or(0);
    let hint_penalty = config.base_potential.saturating_sub(capped_score);

    let w_max = u64::from(config.max_range_width);
    if w_max == 0 {
        return RangeScore {
            score: 0,
            hint_penalty,
            width_factor: 0.0,
        };
    }

    // clamp(W_MAX - width + 1, 0, W_MAX)
    let numerator = (w_max + 1).saturating_sub(u64::from(range_width)).min(w_max);
    let width_factor = numerator as f64 / w_max as f64;

    let score = if contained {
        (u64::from(capped_score) * numerator / w_max) as u32
    } else {
        0
    };

    RangeScore {
        score,
        hint_penalty,
        width_factor,
    }
}
