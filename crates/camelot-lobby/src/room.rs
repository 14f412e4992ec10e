//! The room record and its local invariant checks.

use std::time::Instant;

use camelot_protocol::{PlayerId, RoomCode, RoomStatus};
use camelot_rules::Character;

use crate::LobbyError;

/// A room registered in the lobby.
///
/// Membership order in `player_ids` is join order; the head of the list
/// is the next host if the current one leaves or goes stale. The member
/// count is always derived from the list, never stored separately.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: u64,
    pub room_code: RoomCode,
    pub host_player_id: PlayerId,
    pub status: RoomStatus,
    /// Optional characters the host enabled at configure time.
    pub optional_characters: Vec<Character>,
    /// Members in join order.
    pub player_ids: Vec<PlayerId>,
    pub created_at: Instant,
}

impl Room {
    pub fn new(id: u64, room_code: RoomCode, host_player_id: PlayerId) -> Self {
        Self {
            id,
            room_code,
            host_player_id,
            status: RoomStatus::Waiting,
            optional_characters: Vec::new(),
            player_ids: vec![host_player_id],
            created_at: Instant::now(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.player_ids.len()
    }

    pub fn is_member(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }

    /// The single host guard: every host-only operation goes through
    /// here rather than re-checking `host_player_id` inline.
    pub fn require_host(&self, player_id: PlayerId) -> Result<(), LobbyError> {
        if self.host_player_id == player_id {
            Ok(())
        } else {
            Err(LobbyError::NotHost(player_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(1, RoomCode::new("123456"), PlayerId(1))
    }

    #[test]
    fn test_new_room_is_waiting_with_host_as_sole_member() {
        let room = room();
        assert_eq!(room.status, RoomStatus::Waiting);
        assert_eq!(room.player_ids, vec![PlayerId(1)]);
        assert_eq!(room.player_count(), 1);
        assert!(room.optional_characters.is_empty());
    }

    #[test]
    fn test_require_host_accepts_host() {
        assert_eq!(room().require_host(PlayerId(1)), Ok(()));
    }

    #[test]
    fn test_require_host_rejects_non_host() {
        assert_eq!(
            room().require_host(PlayerId(2)),
            Err(LobbyError::NotHost(PlayerId(2)))
        );
    }

    #[test]
    fn test_membership_check() {
        let mut room = room();
        room.player_ids.push(PlayerId(2));
        assert!(room.is_member(PlayerId(2)));
        assert!(!room.is_member(PlayerId(3)));
    }
}
