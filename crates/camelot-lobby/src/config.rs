//! Registry configuration.

use std::time::Duration;

/// Tunables for the lobby registry.
#[derive(Debug, Clone)]
pub struct LobbyConfig {
    /// Number of digits in a room code.
    pub room_code_len: usize,

    /// How long a player may go without a heartbeat before the stale
    /// sweep evicts them.
    ///
    /// Default: 10 seconds. Clients poll the room every couple of
    /// seconds, so anything past this means the tab is gone.
    pub stale_after: Duration,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            room_code_len: 6,
            stale_after: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LobbyConfig::default();
        assert_eq!(config.room_code_len, 6);
        assert_eq!(config.stale_after, Duration::from_secs(10));
    }
}
