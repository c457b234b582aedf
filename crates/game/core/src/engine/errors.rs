//! Error types for state derivation.

use crate::state::Year;

/// Faults detected while computing a ready state.
///
/// These indicate data that the submission layer or the progress boundary
/// should have rejected. Derivation converts them into the
/// `State derivation failed` error variant; they never escape as panics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeriveError {
    #[error("range start {start} exceeds end {end}")]
    InvertedRange { start: Year, end: Year },
}
