//! Team composition rules: the official per-count table, the selectable
//! character pool, and roster validation.

use serde::{Deserialize, Serialize};

use crate::{Character, SelectionError};

/// How many Good and Evil players a game of a given size must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub good: usize,
    pub evil: usize,
}

/// The official team table. `None` outside the supported 5–10 range.
pub fn team_split(player_count: usize) -> Option<TeamSplit> {
    let (good, evil) = match player_count {
        5 => (3, 2),
        6 => (4, 2),
        7 => (4, 3),
        8 => (5, 3),
        9 => (6, 3),
        10 => (6, 4),
        _ => return None,
    };
    Some(TeamSplit { good, evil })
}

/// The characters players may pick from, given the room's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPool {
    pub good: Vec<Character>,
    pub evil: Vec<Character>,
    pub good_count: usize,
    pub evil_count: usize,
}

/// Computes the selectable pool for a player count and the host's
/// enabled optional characters.
///
/// Merlin and Loyal Servant (Good) and Assassin and Minion of Mordred
/// (Evil) are always selectable; Percival, Mordred, Oberon, and Morgana
/// appear only when enabled. Outside the 5–10 range the pool is empty
/// and both counts are zero.
pub fn available_characters(
    player_count: usize,
    optional_characters: &[Character],
) -> CharacterPool {
    let Some(split) = team_split(player_count) else {
        return CharacterPool {
            good: Vec::new(),
            evil: Vec::new(),
            good_count: 0,
            evil_count: 0,
        };
    };

    let mut good = vec![Character::Merlin, Character::LoyalServant];
    let mut evil = vec![Character::Assassin, Character::MinionOfMordred];

    if optional_characters.contains(&Character::Percival) {
        good.push(Character::Percival);
    }
    if optional_characters.contains(&Character::Mordred) {
        evil.push(Character::Mordred);
    }
    if optional_characters.contains(&Character::Oberon) {
        evil.push(Character::Oberon);
    }
    if optional_characters.contains(&Character::Morgana) {
        evil.push(Character::Morgana);
    }

    CharacterPool {
        good,
        evil,
        good_count: split.good,
        evil_count: split.evil,
    }
}

/// Checks a complete roster against the official composition rules.
///
/// Rules are checked in a fixed order and the first violation is
/// returned: player count, team distribution, Merlin present, Assassin
/// present, no duplicate unique characters, optional characters enabled.
pub fn validate_selection(
    roster: &[crate::RosterEntry],
    optional_characters: &[Character],
) -> Result<(), SelectionError> {
    let player_count = roster.len();
    if !(5..=10).contains(&player_count) {
        return Err(SelectionError::PlayerCount(player_count));
    }

    let split = team_split(player_count).expect("count checked above");
    let good = roster.iter().filter(|e| e.character.is_good()).count();
    let evil = roster.iter().filter(|e| e.character.is_evil()).count();
    if good != split.good || evil != split.evil {
        return Err(SelectionError::TeamSplit {
            expected_good: split.good,
            expected_evil: split.evil,
        });
    }

    if !roster.iter().any(|e| e.character == Character::Merlin) {
        return Err(SelectionError::MissingMerlin);
    }
    if !roster.iter().any(|e| e.character == Character::Assassin) {
        return Err(SelectionError::MissingAssassin);
    }

    for character in Character::ALL.into_iter().filter(|c| !c.is_filler()) {
        let count = roster.iter().filter(|e| e.character == character).count();
        if count > 1 {
            return Err(SelectionError::Duplicate(character));
        }
    }

    for entry in roster {
        if entry.character.requires_opt_in()
            && !optional_characters.contains(&entry.character)
        {
            return Err(SelectionError::NotEnabled(entry.character));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RosterEntry;

    fn roster(characters: &[Character]) -> Vec<RosterEntry> {
        characters
            .iter()
            .enumerate()
            .map(|(i, c)| RosterEntry {
                player_name: format!("player{i}"),
                character: *c,
            })
            .collect()
    }

    /// A legal 5-player base game: 3 Good, 2 Evil, no optionals.
    fn base_five() -> Vec<RosterEntry> {
        roster(&[
            Character::Merlin,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
        ])
    }

    // =====================================================================
    // team_split()
    // =====================================================================

    #[test]
    fn test_team_split_counts_sum_to_player_count() {
        for n in 5..=10 {
            let split = team_split(n).expect("in-range count");
            assert_eq!(split.good + split.evil, n, "split for {n} players");
        }
    }

    #[test]
    fn test_team_split_matches_official_table() {
        assert_eq!(team_split(5), Some(TeamSplit { good: 3, evil: 2 }));
        assert_eq!(team_split(7), Some(TeamSplit { good: 4, evil: 3 }));
        assert_eq!(team_split(10), Some(TeamSplit { good: 6, evil: 4 }));
    }

    #[test]
    fn test_team_split_outside_range_is_none() {
        assert_eq!(team_split(4), None);
        assert_eq!(team_split(11), None);
        assert_eq!(team_split(0), None);
    }

    // =====================================================================
    // available_characters()
    // =====================================================================

    #[test]
    fn test_available_base_pool_without_optionals() {
        let pool = available_characters(5, &[]);
        assert_eq!(pool.good, vec![Character::Merlin, Character::LoyalServant]);
        assert_eq!(
            pool.evil,
            vec![Character::Assassin, Character::MinionOfMordred]
        );
        assert_eq!(pool.good_count, 3);
        assert_eq!(pool.evil_count, 2);
    }

    #[test]
    fn test_available_appends_enabled_optionals() {
        let optional = [
            Character::Percival,
            Character::Mordred,
            Character::Oberon,
            Character::Morgana,
        ];
        let pool = available_characters(8, &optional);
        assert!(pool.good.contains(&Character::Percival));
        assert!(pool.evil.contains(&Character::Mordred));
        assert!(pool.evil.contains(&Character::Oberon));
        assert!(pool.evil.contains(&Character::Morgana));
    }

    #[test]
    fn test_available_skips_disabled_optionals() {
        let pool = available_characters(7, &[Character::Percival]);
        assert!(pool.good.contains(&Character::Percival));
        assert!(!pool.evil.contains(&Character::Mordred));
        assert!(!pool.evil.contains(&Character::Oberon));
        assert!(!pool.evil.contains(&Character::Morgana));
    }

    #[test]
    fn test_available_counts_follow_table_for_all_sizes() {
        for n in 5..=10 {
            let pool = available_characters(n, &[]);
            let split = team_split(n).unwrap();
            assert_eq!(pool.good_count, split.good);
            assert_eq!(pool.evil_count, split.evil);
            assert_eq!(pool.good_count + pool.evil_count, n);
        }
    }

    #[test]
    fn test_available_outside_range_is_empty() {
        let pool = available_characters(3, &[Character::Percival]);
        assert!(pool.good.is_empty());
        assert!(pool.evil.is_empty());
        assert_eq!(pool.good_count, 0);
        assert_eq!(pool.evil_count, 0);
    }

    // =====================================================================
    // validate_selection()
    // =====================================================================

    #[test]
    fn test_validate_accepts_legal_base_game() {
        assert_eq!(validate_selection(&base_five(), &[]), Ok(()));
    }

    #[test]
    fn test_validate_rejects_too_few_players() {
        let r = roster(&[
            Character::Merlin,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
        ]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::PlayerCount(4))
        );
    }

    #[test]
    fn test_validate_rejects_wrong_distribution() {
        // 5 players but 4 Good / 1 Evil.
        let r = roster(&[
            Character::Merlin,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::Assassin,
        ]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::TeamSplit {
                expected_good: 3,
                expected_evil: 2,
            })
        );
    }

    #[test]
    fn test_validate_rejects_missing_merlin_regardless_of_counts() {
        // Distribution is right (3/2) but no Merlin.
        let r = roster(&[
            Character::LoyalServant,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
        ]);
        assert_eq!(validate_selection(&r, &[]), Err(SelectionError::MissingMerlin));
    }

    #[test]
    fn test_validate_rejects_missing_assassin_regardless_of_counts() {
        let r = roster(&[
            Character::Merlin,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::MinionOfMordred,
            Character::MinionOfMordred,
        ]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::MissingAssassin)
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_unique_character() {
        // Two Merlins; fillers pad the distribution to 4/2.
        let r = roster(&[
            Character::Merlin,
            Character::Merlin,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
        ]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::Duplicate(Character::Merlin))
        );
    }

    #[test]
    fn test_validate_allows_duplicate_fillers() {
        // 7 players: 4 Good (1 Merlin + 3 Servants), 3 Evil
        // (1 Assassin + 2 Minions). Duplicated fillers are fine.
        let r = roster(&[
            Character::Merlin,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
            Character::MinionOfMordred,
        ]);
        assert_eq!(validate_selection(&r, &[]), Ok(()));
    }

    #[test]
    fn test_validate_rejects_disabled_optional_character() {
        let r = roster(&[
            Character::Merlin,
            Character::Percival,
            Character::LoyalServant,
            Character::Assassin,
            Character::MinionOfMordred,
        ]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::NotEnabled(Character::Percival))
        );
    }

    #[test]
    fn test_validate_accepts_enabled_optional_characters() {
        let r = roster(&[
            Character::Merlin,
            Character::Percival,
            Character::LoyalServant,
            Character::Assassin,
            Character::Morgana,
        ]);
        let optional = [Character::Percival, Character::Morgana];
        assert_eq!(validate_selection(&r, &optional), Ok(()));
    }

    #[test]
    fn test_validate_count_check_precedes_distribution_check() {
        // 11 one-sided players: the count error must win.
        let r = roster(&[Character::LoyalServant; 11]);
        assert_eq!(
            validate_selection(&r, &[]),
            Err(SelectionError::PlayerCount(11))
        );
    }
}
