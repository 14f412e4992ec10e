//! Official game rules for Camelot: characters, team composition, and
//! role reveals.
//!
//! Everything in this crate is a pure function over a roster snapshot —
//! no state, no I/O. The lobby registry owns the mutable world; this
//! crate only answers questions about it:
//!
//! - [`Character`] / [`Allegiance`] — the closed set of official roles
//!   and which side each fights for
//! - [`reveal_for`] — what a given player is allowed to learn about the
//!   rest of the roster once the game starts
//! - [`validate_selection`] — whether a roster is legal under the
//!   official composition rules
//! - [`available_characters`] — the selectable pool for a player count
//!   and set of enabled optional characters

mod character;
mod error;
mod reveal;
mod setup;

pub use character::{Allegiance, Character};
pub use error::SelectionError;
pub use reveal::{Reveal, RosterEntry, reveal_for};
pub use setup::{CharacterPool, TeamSplit, available_characters, team_split, validate_selection};
