//! The lobby service: dispatches the request/response contract onto the
//! registry and the rules engine.
//!
//! This is the only place the two cores meet. The registry never learns
//! reveal rules; the rules crate never mutates state. The service:
//!
//! - runs full-roster validation before letting the registry start a game
//! - checks a pick against the room's configured pool before the
//!   registry's taken-check
//! - gates reveals on game start and a selected character
//! - piggybacks heartbeats on room polls and triggers the opportunistic
//!   stale sweep there

use camelot_lobby::{LobbyConfig, LobbyError, LobbyRegistry};
use camelot_protocol::{PlayerId, Request, Response, RoomCode};
use camelot_rules::{
    Character, RosterEntry, SelectionError, available_characters, reveal_for, validate_selection,
};

/// Everything that can go wrong while serving a request.
///
/// Wraps the registry's and the rules engine's errors and adds the
/// conditions only the service can detect. The wire mapping lives in
/// [`status_code`](Self::status_code) so the taxonomy is defined once.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Lobby(#[from] LobbyError),

    /// The roster fails the official composition rules.
    #[error("invalid character selection: {0}")]
    Selection(#[from] SelectionError),

    /// A create/join request with an empty player name.
    #[error("player name is required")]
    EmptyPlayerName,

    /// The character pool is undefined until the host configures.
    #[error("host must configure optional characters first")]
    NotConfigured,

    /// The picked character is not in this room's pool.
    #[error("{0} is not available for this game")]
    CharacterNotAvailable(Character),

    /// Reveals only exist once the game has started.
    #[error("game has not started yet")]
    NotStarted,

    /// The player never picked a character, so there is nothing to
    /// reveal.
    #[error("player has not selected a character")]
    NoCharacterSelected,
}

impl ServiceError {
    /// HTTP-style status code carried in [`Response::Error`].
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Lobby(
                LobbyError::RoomNotFound(_)
                | LobbyError::PlayerNotFound(_)
                | LobbyError::PlayerNotInRoom(_),
            ) => 404,
            Self::Lobby(LobbyError::NotHost(_)) => 403,
            Self::Lobby(LobbyError::NameTaken(_) | LobbyError::CharacterTaken(_)) => 409,
            Self::Selection(_) => 422,
            _ => 400,
        }
    }
}

/// The request/response boundary over one [`LobbyRegistry`].
///
/// Synchronous and single-threaded; the server wraps it in one async
/// mutex, so every dispatch is atomic with respect to all lobby state.
pub struct LobbyService {
    registry: LobbyRegistry,
}

impl LobbyService {
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            registry: LobbyRegistry::new(config),
        }
    }

    /// Handles one request. Failures become [`Response::Error`]; the
    /// transport never sees a service error.
    pub fn dispatch(&mut self, request: Request) -> Response {
        match self.handle(request) {
            Ok(response) => response,
            Err(err) => Response::Error {
                code: err.status_code(),
                message: err.to_string(),
            },
        }
    }

    fn handle(&mut self, request: Request) -> Result<Response, ServiceError> {
        match request {
            Request::CreateRoom { player_name } => {
                require_name(&player_name)?;
                let (room, player) = self.registry.create_room(&player_name);
                Ok(Response::RoomCreated { room, player })
            }

            Request::JoinRoom {
                room_code,
                player_name,
            } => {
                require_name(&player_name)?;
                let (room, player) = self.registry.join_room(&room_code, &player_name)?;
                Ok(Response::RoomJoined { room, player })
            }

            Request::GetRoom {
                room_code,
                player_id,
            } => {
                // Heartbeat first so the polling player is fresh when
                // the sweep judges staleness.
                if let Some(player_id) = player_id {
                    self.registry.heartbeat(player_id);
                }
                self.registry.cleanup_stale(&room_code);

                let room = self
                    .registry
                    .room_with_players(&room_code)
                    .ok_or(LobbyError::RoomNotFound(room_code))?;
                Ok(Response::Room { room })
            }

            Request::ConfigureRoom {
                room_code,
                player_id,
                optional_characters,
            } => {
                let room =
                    self.registry
                        .configure_room(&room_code, player_id, optional_characters)?;
                Ok(Response::Room { room })
            }

            Request::GetAvailableCharacters { room_code } => {
                self.available_characters(&room_code)
            }

            Request::SelectCharacter {
                player_id,
                character,
            } => self.select_character(player_id, character),

            Request::StartGame {
                room_code,
                player_id,
            } => self.start_game(&room_code, player_id),

            Request::GetReveal { player_id } => self.reveal(player_id),

            Request::ResetGame {
                room_code,
                player_id,
            } => {
                let room = self.registry.reset_game(&room_code, player_id)?;
                Ok(Response::Room { room })
            }

            Request::BackToLobby {
                room_code,
                player_id,
            } => {
                let room = self.registry.back_to_lobby(&room_code, player_id)?;
                Ok(Response::Room { room })
            }

            Request::KickPlayer {
                room_code,
                player_id,
                target_id,
            } => {
                let room = self.registry.kick_player(&room_code, player_id, target_id)?;
                Ok(Response::Room { room })
            }

            Request::LeaveRoom {
                room_code,
                player_id,
            } => {
                let room = self.registry.leave_room(&room_code, player_id)?;
                Ok(Response::Room { room })
            }

            Request::Heartbeat { player_id } => {
                self.registry.heartbeat(player_id);
                Ok(Response::Ok)
            }

            Request::Ping => Ok(Response::Pong),
        }
    }

    fn available_characters(&mut self, room_code: &RoomCode) -> Result<Response, ServiceError> {
        let room = self
            .registry
            .room(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;

        if !room.status.selection_active() && !room.status.is_started() {
            return Err(ServiceError::NotConfigured);
        }

        let available = available_characters(room.player_count(), &room.optional_characters);
        let selected: Vec<Character> = self
            .registry
            .players_in_room(room_code)
            .iter()
            .filter_map(|p| p.character_role)
            .collect();

        Ok(Response::AvailableCharacters {
            available,
            selected,
        })
    }

    fn select_character(
        &mut self,
        player_id: PlayerId,
        character: Character,
    ) -> Result<Response, ServiceError> {
        if self.registry.player(player_id).is_none() {
            return Err(LobbyError::PlayerNotFound(player_id).into());
        }
        let room = self
            .registry
            .room_by_player(player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))?;

        // The registry checks for conflicts; the pool check is ours.
        let pool = available_characters(room.player_count(), &room.optional_characters);
        if !pool.good.contains(&character) && !pool.evil.contains(&character) {
            return Err(ServiceError::CharacterNotAvailable(character));
        }

        let player = self.registry.select_character(player_id, character)?;
        Ok(Response::CharacterSelected { player })
    }

    fn start_game(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<Response, ServiceError> {
        let room = self
            .registry
            .room(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;

        // Host check first: a non-host always gets Forbidden, never a
        // validation result leaked from someone else's roster.
        room.require_host(player_id)?;
        let optional = room.optional_characters.clone();

        let members = self.registry.players_in_room(room_code);
        let mut roster = Vec::with_capacity(members.len());
        for player in members {
            let character = player
                .character_role
                .ok_or(LobbyError::IncompleteSelection)?;
            roster.push(RosterEntry {
                player_name: player.player_name.clone(),
                character,
            });
        }
        validate_selection(&roster, &optional)?;

        let room = self.registry.start_game(room_code, player_id)?;
        Ok(Response::Room { room })
    }

    fn reveal(&mut self, player_id: PlayerId) -> Result<Response, ServiceError> {
        let player = self
            .registry
            .player(player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))?;
        let player_name = player.player_name.clone();
        let character_role = player.character_role;

        let room = self
            .registry
            .room_by_player(player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))?;
        if !room.status.is_started() {
            return Err(ServiceError::NotStarted);
        }
        let character = character_role.ok_or(ServiceError::NoCharacterSelected)?;
        let room_code = room.room_code.clone();

        let roster: Vec<RosterEntry> = self
            .registry
            .players_in_room(&room_code)
            .iter()
            .filter_map(|p| {
                p.character_role.map(|c| RosterEntry {
                    player_name: p.player_name.clone(),
                    character: c,
                })
            })
            .collect();

        let reveal = reveal_for(&player_name, character, &roster);
        Ok(Response::Reveal { reveal })
    }
}

fn require_name(player_name: &str) -> Result<(), ServiceError> {
    if player_name.trim().is_empty() {
        return Err(ServiceError::EmptyPlayerName);
    }
    Ok(())
}

// =========================================================================
// Tests
// =========================================================================
