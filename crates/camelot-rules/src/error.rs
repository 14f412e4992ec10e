//! Error type for roster validation.

use crate::Character;

/// The first official-rules violation found in a roster.
///
/// Variants are ordered the way [`validate_selection`](crate::validate_selection)
/// checks them: player count, team distribution, required characters,
/// duplicates, opt-in gating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The roster size is outside the supported 5–10 range.
    #[error("invalid player count: {0}, must be between 5 and 10")]
    PlayerCount(usize),

    /// The Good/Evil split does not match the official table for this
    /// player count.
    #[error(
        "invalid team distribution: need {expected_good} Good and {expected_evil} Evil players"
    )]
    TeamSplit {
        expected_good: usize,
        expected_evil: usize,
    },

    /// Every game must include Merlin.
    #[error("Merlin is required in all games")]
    MissingMerlin,

    /// Every game must include the Assassin.
    #[error("Assassin is required in all games")]
    MissingAssassin,

    /// A unique character appears more than once.
    #[error("cannot have multiple {0} characters")]
    Duplicate(Character),

    /// An optional character is in play without being enabled by the host.
    #[error("{0} is not enabled for this game")]
    NotEnabled(Character),
}
