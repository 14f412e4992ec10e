//! Core protocol types: identity newtypes, room lifecycle status, read
//! models, and the request/response contract.

use std::fmt;

use camelot_rules::{Character, CharacterPool, Reveal};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique, monotonically assigned player identifier.
///
/// Ids are never reused while referenced, so a stale client polling with
/// an evicted id gets a clean not-found rather than someone else's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The human-shareable join key for a room: a fixed-length digit string.
///
/// Unique among currently registered rooms only — a code may be reissued
/// after the room that held it is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Room lifecycle status
// ---------------------------------------------------------------------------

/// The lifecycle state of a room. Part of the wire vocabulary: every
/// [`RoomView`] carries it and clients branch on it.
///
/// ```text
/// Waiting ──(configure)──▶ CharacterSelection ──(start)──▶ Started
///    ▲                        │        ▲                      │
///    └──────(back to lobby)───┤        └───────(reset)────────┤
///    ▲                        │                               │
///    └────────────────────────┴──────(back to lobby)──────────┘
/// ```
///
/// There is no direct Waiting → Started transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    CharacterSelection,
    Started,
}

impl RoomStatus {
    /// New players may join until the game starts.
    pub fn is_joinable(self) -> bool {
        !matches!(self, Self::Started)
    }

    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }

    /// Character selection is only open in the selection phase.
    pub fn selection_active(self) -> bool {
        matches!(self, Self::CharacterSelection)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::CharacterSelection => write!(f, "character_selection"),
            Self::Started => write!(f, "started"),
        }
    }
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// One room member as shown to every other member.
///
/// Selected roles are visible to the whole room; secrecy lives in the
/// reveal payload, not here. Clients are trusted to request only their
/// own reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub player_name: String,
    pub character_role: Option<Character>,
    pub is_host: bool,
}

/// A room joined with its resolved member list — the shape the
/// presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: u64,
    pub room_code: RoomCode,
    pub host_player_id: PlayerId,
    pub status: RoomStatus,
    pub player_count: usize,
    pub optional_characters: Vec<Character>,
    pub players: Vec<PlayerView>,
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A client request. One variant per service operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Create a room; the caller becomes its host and sole member.
    CreateRoom { player_name: String },

    /// Join an existing room by code.
    JoinRoom {
        room_code: RoomCode,
        player_name: String,
    },

    /// Fetch a room with its members. When `player_id` is present it is
    /// treated as a heartbeat from that player; the read also triggers
    /// the stale-member sweep for this room.
    GetRoom {
        room_code: RoomCode,
        #[serde(default)]
        player_id: Option<PlayerId>,
    },

    /// Host-only: enable optional characters and open character
    /// selection. One-way — reconfiguring requires going back to lobby.
    ConfigureRoom {
        room_code: RoomCode,
        player_id: PlayerId,
        optional_characters: Vec<Character>,
    },

    /// The selectable pool plus the roles already taken.
    GetAvailableCharacters { room_code: RoomCode },

    /// Pick (or change) the caller's character.
    SelectCharacter {
        player_id: PlayerId,
        character: Character,
    },

    /// Host-only: validate the roster and start the game.
    StartGame {
        room_code: RoomCode,
        player_id: PlayerId,
    },

    /// What the caller's character is entitled to know.
    GetReveal { player_id: PlayerId },

    /// Host-only: clear all roles and return to character selection.
    ResetGame {
        room_code: RoomCode,
        player_id: PlayerId,
    },

    /// Host-only: clear all roles and return to the waiting lobby.
    BackToLobby {
        room_code: RoomCode,
        player_id: PlayerId,
    },

    /// Host-only: remove another member from the room.
    KickPlayer {
        room_code: RoomCode,
        player_id: PlayerId,
        target_id: PlayerId,
    },

    /// Leave the room. Host reassigns to the earliest-joined survivor.
    LeaveRoom {
        room_code: RoomCode,
        player_id: PlayerId,
    },

    /// Standalone liveness ping for the stale-eviction clock.
    Heartbeat { player_id: PlayerId },

    /// Health check.
    Ping,
}

/// A service response. Failures are carried as [`Response::Error`] with
/// an HTTP-style status code; transport never sees service errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    RoomCreated { room: RoomView, player: PlayerView },
    RoomJoined { room: RoomView, player: PlayerView },
    Room { room: RoomView },
    AvailableCharacters {
        available: CharacterPool,
        selected: Vec<Character>,
    },
    CharacterSelected { player: PlayerView },
    Reveal { reveal: Reveal },
    /// Acknowledgement for side-effect-only requests (heartbeat).
    Ok,
    Pong,
    Error { code: u16, message: String },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! JSON-shape tests. Clients parse these exact forms, so the serde
    //! attributes are contract, not implementation detail.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::new("493817")).unwrap();
        assert_eq!(json, "\"493817\"");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_room_code_display_is_bare_code() {
        assert_eq!(RoomCode::new("000123").to_string(), "000123");
    }

    // =====================================================================
    // RoomStatus
    // =====================================================================

    #[test]
    fn test_room_status_serializes_snake_case() {
        let json = serde_json::to_string(&RoomStatus::CharacterSelection).unwrap();
        assert_eq!(json, "\"character_selection\"");
    }

    #[test]
    fn test_room_status_joinable_until_started() {
        assert!(RoomStatus::Waiting.is_joinable());
        assert!(RoomStatus::CharacterSelection.is_joinable());
        assert!(!RoomStatus::Started.is_joinable());
    }

    #[test]
    fn test_room_status_selection_active_only_in_selection() {
        assert!(!RoomStatus::Waiting.selection_active());
        assert!(RoomStatus::CharacterSelection.selection_active());
        assert!(!RoomStatus::Started.selection_active());
    }

    // =====================================================================
    // Request — internally tagged JSON
    // =====================================================================

    #[test]
    fn test_request_create_room_json_format() {
        // `#[serde(tag = "type")]` produces internally tagged JSON:
        //   { "type": "CreateRoom", "player_name": "alice" }
        let req = Request::CreateRoom {
            player_name: "alice".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "CreateRoom");
        assert_eq!(json["player_name"], "alice");
    }

    #[test]
    fn test_request_get_room_player_id_defaults_to_none() {
        // Pure room polls omit player_id entirely.
        let json = r#"{ "type": "GetRoom", "room_code": "123456" }"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            Request::GetRoom {
                room_code: RoomCode::new("123456"),
                player_id: None,
            }
        );
    }

    #[test]
    fn test_request_select_character_uses_card_names() {
        let json = r#"{
            "type": "SelectCharacter",
            "player_id": 3,
            "character": "Minion of Mordred"
        }"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            Request::SelectCharacter {
                player_id: PlayerId(3),
                character: camelot_rules::Character::MinionOfMordred,
            }
        );
    }

    #[test]
    fn test_request_ping_is_bare_tag() {
        let json = serde_json::to_string(&Request::Ping).unwrap();
        assert_eq!(json, r#"{"type":"Ping"}"#);
    }

    // =====================================================================
    // Response
    // =====================================================================

    #[test]
    fn test_response_error_json_format() {
        let resp = Response::Error {
            code: 403,
            message: "only the host can start the game".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["code"], 403);
    }

    #[test]
    fn test_response_room_round_trip() {
        let resp = Response::Room {
            room: RoomView {
                id: 1,
                room_code: RoomCode::new("654321"),
                host_player_id: PlayerId(1),
                status: RoomStatus::Waiting,
                player_count: 1,
                optional_characters: vec![],
                players: vec![PlayerView {
                    id: PlayerId(1),
                    player_name: "alice".into(),
                    character_role: None,
                    is_host: true,
                }],
            },
        };
        let bytes = serde_json::to_vec(&resp).unwrap();
        let decoded: Response = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(resp, decoded);
    }

    #[test]
    fn test_unselected_role_serializes_as_null() {
        let view = PlayerView {
            id: PlayerId(9),
            player_name: "bob".into(),
            character_role: None,
            is_host: false,
        };
        let json: serde_json::Value = serde_json::to_value(&view).unwrap();
        assert!(json["character_role"].is_null());
    }

    // =====================================================================
    // Error cases — malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let result: Result<Request, _> = serde_json::from_slice(b"not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unknown_request_type_returns_error() {
        let unknown = r#"{"type": "SummonDragon", "count": 3}"#;
        let result: Result<Request, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_fields_returns_error() {
        let incomplete = r#"{"type": "JoinRoom", "room_code": "123456"}"#;
        let result: Result<Request, _> = serde_json::from_str(incomplete);
        assert!(result.is_err());
    }
}
