//! Error types for the registry.

use camelot_protocol::{PlayerId, RoomCode, RoomStatus};
use camelot_rules::Character;

/// Errors that can occur during registry operations.
///
/// Every variant is an expected, recoverable, caller-facing condition —
/// the registry never panics on bad input. The service layer maps these
/// to wire status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    /// No room is registered under this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// No player exists with this id.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The game has already started; the room no longer accepts joins.
    #[error("game in room {0} has already started")]
    GameAlreadyStarted(RoomCode),

    /// Another member of the room already uses this name.
    #[error("player name {0:?} already taken in this room")]
    NameTaken(String),

    /// A host-only operation was attempted by a non-host.
    #[error("player {0} is not the host of this room")]
    NotHost(PlayerId),

    /// The operation is not valid from the room's current status.
    #[error("operation not allowed while the room is {0}")]
    InvalidTransition(RoomStatus),

    /// Character selection is not currently open.
    #[error("character selection is not active")]
    SelectionNotActive,

    /// A unique character is already held by another member.
    #[error("{0} already selected by another player")]
    CharacterTaken(Character),

    /// Not every member has selected a character yet.
    #[error("all players must select a character first")]
    IncompleteSelection,

    /// The host tried to kick themself.
    #[error("the host cannot kick themself")]
    CannotKickSelf,

    /// The target player is not a member of this room.
    #[error("player {0} is not in this room")]
    PlayerNotInRoom(PlayerId),
}
