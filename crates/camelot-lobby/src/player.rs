//! The player record: one entry per person in a room.

use std::time::{Duration, Instant};

use camelot_protocol::{PlayerId, PlayerView};
use camelot_rules::Character;

/// A player registered in a room.
///
/// Belongs to exactly one room for its whole lifetime; leaving, being
/// kicked, or going stale destroys the record. `Instant` timestamps are
/// internal only — they drive eviction and never cross the wire.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    /// Back-reference to the owning room's numeric id.
    pub room_id: u64,
    /// Unique within the room, not globally. Case-sensitive.
    pub player_name: String,
    /// `None` until the player picks a character during selection.
    pub character_role: Option<Character>,
    pub is_host: bool,
    pub joined_at: Instant,
    /// Refreshed by each heartbeat; drives stale eviction.
    pub last_seen: Instant,
}

impl Player {
    pub fn new(id: PlayerId, room_id: u64, player_name: &str, is_host: bool) -> Self {
        let now = Instant::now();
        Self {
            id,
            room_id,
            player_name: player_name.to_string(),
            character_role: None,
            is_host,
            joined_at: now,
            last_seen: now,
        }
    }

    /// Records a heartbeat.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Whether the player's last heartbeat is older than `threshold`.
    pub fn is_stale(&self, threshold: Duration) -> bool {
        self.last_seen.elapsed() > threshold
    }

    /// The wire representation of this player.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            player_name: self.player_name.clone(),
            character_role: self.character_role,
            is_host: self.is_host,
        }
    }
}
