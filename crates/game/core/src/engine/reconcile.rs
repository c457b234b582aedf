//! Merging server-persisted and session-local guess sequences.
//!
//! A guess can exist on the server, locally, or both (submitted this session
//! and already flushed). Reconciliation produces one canonical sequence:
//! server entries first in their original order, then session entries whose
//! value has not been seen yet, truncated to the guess cap.

use std::collections::HashSet;

use crate::state::{RangeGuess, Year};

/// Merge server and session guesses into one ordered, de-duplicated,
/// capped sequence.
///
/// Membership is tracked in a set so the merge is O(n + m) rather than a
/// repeated linear scan. Never fails: overflow past `cap` truncates
/// silently.
pub fn reconcile(server: &[Year], session: &[Year], cap: usize) -> Vec<Year> {
    let mut seen: HashSet<Year> = server.iter().copied().collect();
    let mut merged: Vec<Year> = server.to_vec();

    for &year in session {
        if seen.insert(year) {
            merged.push(year);
        }
    }

    merged.truncate(cap);
    merged
}

/// Merge range guesses under the same ordering rule.
///
/// When either side carries explicit ranges, the result is server ranges
/// followed by session ranges, truncated to `cap`. When neither does, the
/// reconciled guess sequence is lifted into degenerate single-point ranges
/// so legacy plain-year progress still renders as ranges.
pub fn merge_ranges(
    server: &[RangeGuess],
    session: &[RangeGuess],
    reconciled_guesses: &[Year],
    cap: usize,
) -> Vec<RangeGuess> {
    if server.is_empty() && session.is_empty() {
        // reconciled_guesses is already capped
        return reconciled_guesses.iter().copied().map(RangeGuess::point).collect();
    }

    let mut merged: Vec<RangeGuess> = server.to_vec();
    merged.extend_from_slice(session);
    merged.truncate(cap);
    merged
}
