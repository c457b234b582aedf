//! Boundary validation for server progress payloads.
//!
//! Progress arrives duck-typed from persistence. This module normalizes it
//! into a well-formed [`ProgressRecord`] before it reaches the pure engine:
//! missing fields default, years clamp into range, and individually
//! malformed ranges are dropped rather than poisoning the whole record.

use serde::Deserialize;

use chronle_core::{ProgressRecord, RangeGuess, Year};

use crate::error::{Result, RuntimeError};

#[derive(Debug, Default, Deserialize)]
struct RawProgress {
    #[serde(default)]
    guesses: Vec<i64>,
    #[serde(default)]
    ranges: Vec<RawRange>,
    #[serde(default)]
    total_score: Option<i64>,
    #[serde(default)]
    completed_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    start: i64,
    end: i64,
    #[serde(default)]
    hints_used: i64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    timestamp: i64,
}

fn clamp_year(value: i64) -> Year {
    value.clamp(i64::from(Year::MIN), i64::from(Year::MAX)) as Year
}

/// Parse and normalize a raw progress payload.
///
/// Fails only when the payload is structurally wrong (not an object, wrong
/// field types). Value-level defects are repaired: negative scores and hint
/// counts clamp to zero, inverted ranges are dropped with a warning.
pub fn parse_progress(value: serde_json::Value) -> Result<ProgressRecord> {
    let raw: RawProgress =
        serde_json::from_value(value).map_err(RuntimeError::MalformedProgress)?;

    let guesses: Vec<Year> = raw.guesses.into_iter().map(clamp_year).collect();

    let mut ranges = Vec::with_capacity(raw.ranges.len());
    for range in raw.ranges {
        if range.start > range.end {
            tracing::warn!(
                start = range.start,
                end = range.end,
                "dropping inverted range from progress record"
            );
            continue;
        }
        ranges.push(RangeGuess::new(
            clamp_year(range.start),
            clamp_year(range.end),
            range.hints_used.max(0).min(i64::from(u32::MAX)) as u32,
            range.score.max(0).min(i64::from(u32::MAX)) as u32,
            range.timestamp,
        ));
    }

    let total_score = raw
        .total_score
        .map(|score| score.max(0).min(i64::from(u32::MAX)) as u32);

    Ok(ProgressRecord {
        guesses,
        ranges,
        total_score,
        completed_at: raw.completed_at,
    })
}
