//! The lobby registry: every room, every player, every transition.
//!
//! ## Lifecycle
//!
//! ```text
//! create_room() ──▶ [Waiting] ──configure_room()──▶ [CharacterSelection]
//!                      ▲                                │        ▲
//!                      │                         start_game()    │
//!                      │                                │   reset_game()
//!                      │                                ▼        │
//!                      └────────back_to_lobby()───── [Started] ──┘
//! ```
//!
//! Players join and leave in any pre-start state; `cleanup_stale` is the
//! only operation that removes players without an explicit request.

use std::collections::HashMap;

use camelot_protocol::{PlayerId, PlayerView, RoomCode, RoomStatus, RoomView};
use camelot_rules::Character;
use rand::Rng;

use crate::{LobbyConfig, LobbyError, Player, Room};

/// Owns all room and player records and their lifecycle transitions.
///
/// All maps are kept in sync by the mutating operations; nothing outside
/// this type touches them. The `player_rooms` reverse index answers
/// "which room owns this player" without scanning every room.
pub struct LobbyRegistry {
    config: LobbyConfig,

    /// Active rooms, keyed by their join code.
    rooms: HashMap<RoomCode, Room>,

    /// All players across all rooms, keyed by id.
    players: HashMap<PlayerId, Player>,

    /// Reverse index: player id → owning room code. Updated by every
    /// membership-changing operation.
    player_rooms: HashMap<PlayerId, RoomCode>,

    /// Monotonic id counters. Ids are never reused.
    next_player_id: u64,
    next_room_id: u64,
}

impl LobbyRegistry {
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            config,
            rooms: HashMap::new(),
            players: HashMap::new(),
            player_rooms: HashMap::new(),
            next_player_id: 0,
            next_room_id: 0,
        }
    }

    // -----------------------------------------------------------------
    // Creation and membership
    // -----------------------------------------------------------------

    /// Creates a fresh room with the caller as host and sole member.
    pub fn create_room(&mut self, player_name: &str) -> (RoomView, PlayerView) {
        self.next_room_id += 1;
        let room_id = self.next_room_id;
        let player_id = self.alloc_player_id();
        let room_code = self.generate_room_code();

        let player = Player::new(player_id, room_id, player_name, true);
        let room = Room::new(room_id, room_code.clone(), player_id);

        self.players.insert(player_id, player);
        self.player_rooms.insert(player_id, room_code.clone());
        self.rooms.insert(room_code.clone(), room);

        tracing::info!(%room_code, %player_id, "room created");

        let room = self.rooms.get(&room_code).expect("just inserted");
        let view = self.room_view(room);
        let player_view = self
            .players
            .get(&player_id)
            .expect("just inserted")
            .view();
        (view, player_view)
    }

    /// Adds a new non-host member to an existing room.
    pub fn join_room(
        &mut self,
        room_code: &RoomCode,
        player_name: &str,
    ) -> Result<(RoomView, PlayerView), LobbyError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;

        if !room.status.is_joinable() {
            return Err(LobbyError::GameAlreadyStarted(room_code.clone()));
        }

        // Names are unique per room, case-sensitive.
        let name_taken = room
            .player_ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .any(|p| p.player_name == player_name);
        if name_taken {
            return Err(LobbyError::NameTaken(player_name.to_string()));
        }

        let room_id = room.id;
        let player_id = self.alloc_player_id();
        self.players
            .insert(player_id, Player::new(player_id, room_id, player_name, false));
        self.player_rooms.insert(player_id, room_code.clone());

        let room = self.rooms.get_mut(room_code).expect("looked up above");
        room.player_ids.push(player_id);

        tracing::info!(
            %room_code,
            %player_id,
            players = room.player_count(),
            "player joined"
        );

        let room = self.rooms.get(room_code).expect("looked up above");
        let view = self.room_view(room);
        let player_view = self
            .players
            .get(&player_id)
            .expect("just inserted")
            .view();
        Ok((view, player_view))
    }

    /// Host-only: removes another member entirely.
    pub fn kick_player(
        &mut self,
        room_code: &RoomCode,
        host_player_id: PlayerId,
        target_id: PlayerId,
    ) -> Result<RoomView, LobbyError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;
        room.require_host(host_player_id)?;

        if target_id == host_player_id {
            return Err(LobbyError::CannotKickSelf);
        }
        if !room.is_member(target_id) {
            return Err(LobbyError::PlayerNotInRoom(target_id));
        }

        self.remove_member(room_code, target_id);
        tracing::info!(%room_code, player_id = %target_id, "player kicked");

        Ok(self.view_of(room_code))
    }

    /// Removes the caller from the room. If the host leaves and members
    /// remain, the earliest-joined survivor becomes host. An emptied
    /// room stays registered as an orphan.
    pub fn leave_room(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<RoomView, LobbyError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;
        if !room.is_member(player_id) {
            return Err(LobbyError::PlayerNotInRoom(player_id));
        }

        self.remove_member(room_code, player_id);
        tracing::info!(%room_code, %player_id, "player left");

        Ok(self.view_of(room_code))
    }

    // -----------------------------------------------------------------
    // Lifecycle transitions
    // -----------------------------------------------------------------

    /// Host-only: sets the optional-character set and opens character
    /// selection. Only valid from Waiting — this gate is one-way; use
    /// [`back_to_lobby`](Self::back_to_lobby) to reconfigure.
    pub fn configure_room(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
        optional_characters: Vec<Character>,
    ) -> Result<RoomView, LobbyError> {
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;
        room.require_host(player_id)?;

        if room.status != RoomStatus::Waiting {
            return Err(LobbyError::InvalidTransition(room.status));
        }

        room.optional_characters = optional_characters;
        room.status = RoomStatus::CharacterSelection;
        tracing::info!(%room_code, "character selection opened");

        Ok(self.view_of(room_code))
    }

    /// Records the caller's character pick.
    ///
    /// Unique characters are rejected if another member holds them;
    /// fillers are unrestricted. Re-selecting overwrites the caller's
    /// own previous pick, freeing the old slot.
    pub fn select_character(
        &mut self,
        player_id: PlayerId,
        character: Character,
    ) -> Result<PlayerView, LobbyError> {
        if !self.players.contains_key(&player_id) {
            return Err(LobbyError::PlayerNotFound(player_id));
        }
        let room_code = self
            .player_rooms
            .get(&player_id)
            .cloned()
            .ok_or(LobbyError::PlayerNotFound(player_id))?;
        let room = self
            .rooms
            .get(&room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;

        if !room.status.selection_active() {
            return Err(LobbyError::SelectionNotActive);
        }

        if !character.is_filler() {
            let taken = room
                .player_ids
                .iter()
                .filter(|id| **id != player_id)
                .filter_map(|id| self.players.get(id))
                .any(|p| p.character_role == Some(character));
            if taken {
                return Err(LobbyError::CharacterTaken(character));
            }
        }

        let player = self
            .players
            .get_mut(&player_id)
            .expect("presence checked above");
        player.character_role = Some(character);
        tracing::debug!(%room_code, %player_id, %character, "character selected");

        Ok(player.view())
    }

    /// Host-only: moves the room to Started.
    ///
    /// Requires every member to have a character. Rule-correctness of
    /// the distribution is the caller's job (the service validates the
    /// roster against the official rules first); the registry only
    /// checks completeness.
    pub fn start_game(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<RoomView, LobbyError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;
        room.require_host(player_id)?;

        if room.status != RoomStatus::CharacterSelection {
            return Err(LobbyError::InvalidTransition(room.status));
        }

        let incomplete = room
            .player_ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .any(|p| p.character_role.is_none());
        if incomplete {
            return Err(LobbyError::IncompleteSelection);
        }

        let room = self.rooms.get_mut(room_code).expect("looked up above");
        room.status = RoomStatus::Started;
        tracing::info!(%room_code, players = room.player_count(), "game started");

        Ok(self.view_of(room_code))
    }

    /// Host-only: clears every member's character and reopens selection.
    /// Valid from CharacterSelection (a self-loop) or Started.
    pub fn reset_game(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<RoomView, LobbyError> {
        self.clear_roles_and_set_status(room_code, player_id, RoomStatus::CharacterSelection)?;
        tracing::info!(%room_code, "game reset to character selection");
        Ok(self.view_of(room_code))
    }

    /// Host-only: clears every member's character and returns all the
    /// way to the waiting lobby, allowing reconfiguration.
    pub fn back_to_lobby(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<RoomView, LobbyError> {
        self.clear_roles_and_set_status(room_code, player_id, RoomStatus::Waiting)?;
        tracing::info!(%room_code, "room returned to lobby");
        Ok(self.view_of(room_code))
    }

    fn clear_roles_and_set_status(
        &mut self,
        room_code: &RoomCode,
        player_id: PlayerId,
        target: RoomStatus,
    ) -> Result<(), LobbyError> {
        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| LobbyError::RoomNotFound(room_code.clone()))?;
        room.require_host(player_id)?;

        // Both transitions exist only once selection has begun.
        if room.status == RoomStatus::Waiting {
            return Err(LobbyError::InvalidTransition(room.status));
        }

        let member_ids = room.player_ids.clone();
        for id in member_ids {
            if let Some(player) = self.players.get_mut(&id) {
                player.character_role = None;
            }
        }

        let room = self.rooms.get_mut(room_code).expect("looked up above");
        room.status = target;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Liveness
    // -----------------------------------------------------------------

    /// Records a heartbeat. No-op if the player is unknown — a client
    /// polling with an already-evicted id is normal, not an error.
    pub fn heartbeat(&mut self, player_id: PlayerId) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.touch();
        }
    }

    /// Evicts every member of the room whose heartbeat is older than the
    /// configured threshold. Returns the evicted ids.
    ///
    /// Freshness is decided here, under the registry's one lock: a
    /// heartbeat that was applied before this call always wins, so a
    /// live player can never be evicted by a racing sweep.
    pub fn cleanup_stale(&mut self, room_code: &RoomCode) -> Vec<PlayerId> {
        let Some(room) = self.rooms.get(room_code) else {
            return Vec::new();
        };

        let stale: Vec<PlayerId> = room
            .player_ids
            .iter()
            .filter(|id| {
                self.players
                    .get(id)
                    .is_some_and(|p| p.is_stale(self.config.stale_after))
            })
            .copied()
            .collect();

        for player_id in &stale {
            self.remove_member(room_code, *player_id);
            tracing::info!(%room_code, %player_id, "stale player evicted");
        }

        stale
    }

    // -----------------------------------------------------------------
    // Lookups (read-only; missing keys are None/empty, never errors)
    // -----------------------------------------------------------------

    pub fn room(&self, room_code: &RoomCode) -> Option<&Room> {
        self.rooms.get(room_code)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    /// Reverse lookup: the room this player belongs to.
    pub fn room_by_player(&self, player_id: PlayerId) -> Option<&Room> {
        let code = self.player_rooms.get(&player_id)?;
        self.rooms.get(code)
    }

    /// The room's members in join order.
    pub fn players_in_room(&self, room_code: &RoomCode) -> Vec<&Player> {
        let Some(room) = self.rooms.get(room_code) else {
            return Vec::new();
        };
        room.player_ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .collect()
    }

    /// The denormalized room-plus-members view for the presentation
    /// layer.
    pub fn room_with_players(&self, room_code: &RoomCode) -> Option<RoomView> {
        self.rooms.get(room_code).map(|room| self.room_view(room))
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn alloc_player_id(&mut self) -> PlayerId {
        self.next_player_id += 1;
        PlayerId(self.next_player_id)
    }

    /// Samples fixed-length digit codes until one misses every live
    /// room. Codes freed by abandoned rooms may be reissued.
    fn generate_room_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let code: String = (0..self.config.room_code_len)
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect();
            let code = RoomCode::new(code);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }

    /// Removes a member from its room, keeping all three maps in sync
    /// and reassigning the host to the earliest-joined survivor when the
    /// host was the one removed.
    fn remove_member(&mut self, room_code: &RoomCode, player_id: PlayerId) {
        self.players.remove(&player_id);
        self.player_rooms.remove(&player_id);

        let Some(room) = self.rooms.get_mut(room_code) else {
            return;
        };
        room.player_ids.retain(|id| *id != player_id);

        if room.host_player_id == player_id {
            if let Some(&new_host) = room.player_ids.first() {
                room.host_player_id = new_host;
                if let Some(player) = self.players.get_mut(&new_host) {
                    player.is_host = true;
                }
                tracing::info!(%room_code, host = %new_host, "host reassigned");
            }
            // An emptied room keeps its dangling host id; it is an
            // orphan until the process restarts.
        }
    }

    fn room_view(&self, room: &Room) -> RoomView {
        RoomView {
            id: room.id,
            room_code: room.room_code.clone(),
            host_player_id: room.host_player_id,
            status: room.status,
            player_count: room.player_count(),
            optional_characters: room.optional_characters.clone(),
            players: room
                .player_ids
                .iter()
                .filter_map(|id| self.players.get(id))
                .map(Player::view)
                .collect(),
        }
    }

    /// View of a room known to exist (used right after a successful
    /// lookup-and-mutate).
    fn view_of(&self, room_code: &RoomCode) -> RoomView {
        let room = self.rooms.get(room_code).expect("room checked by caller");
        self.room_view(room)
    }
}

// =========================================================================
// Tests
// =========================================================================
