//! Role-reveal computation: what each character learns about the roster
//! once the game starts.
//!
//! The visibility rules, per the official game:
//!
//! - Merlin sees every Evil player except Mordred
//! - Percival sees Merlin and Morgana together, without knowing which
//!   is which
//! - Loyal Servants see nobody
//! - Oberon is Evil but cut off from the Evil channel in both
//!   directions: he sees nobody and nobody sees him
//! - Every other Evil player sees every other Evil player except Oberon

use serde::{Deserialize, Serialize};

use crate::{Allegiance, Character};

/// One member of the roster, as the reveal engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_name: String,
    pub character: Character,
}

/// Everything a single player is entitled to learn at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub character: Character,
    pub allegiance: Allegiance,
    /// Names of the other players this character may see. Empty for
    /// characters with no special knowledge.
    pub revealed_players: Vec<String>,
    pub message: String,
}

/// Computes the reveal for one player.
///
/// `roster` must contain every member of the room, including the viewer.
/// Self-exclusion is by `viewer_name`, not by character, so two Minions
/// of Mordred each see the other.
pub fn reveal_for(viewer_name: &str, character: Character, roster: &[RosterEntry]) -> Reveal {
    let (revealed_players, message) = match character {
        Character::Merlin => (
            names(roster, |e| {
                e.character.is_evil() && e.character != Character::Mordred
            }),
            "You are Merlin. You know the agents of Evil (except Mordred if present)."
                .to_string(),
        ),
        Character::Percival => (
            names(roster, |e| {
                matches!(e.character, Character::Merlin | Character::Morgana)
            }),
            "You are Percival. You see Merlin (and Morgana if present), \
             but you must discern which is which."
                .to_string(),
        ),
        Character::LoyalServant => (
            Vec::new(),
            "You are a Loyal Servant of Arthur. You have no special knowledge, \
             but you fight for Good!"
                .to_string(),
        ),
        Character::Oberon => (
            Vec::new(),
            "You are Oberon, a Minion of Mordred. You do not know your fellow \
             agents of Evil, nor do they know you."
                .to_string(),
        ),
        Character::Assassin
        | Character::Mordred
        | Character::Morgana
        | Character::MinionOfMordred => {
            let allies = names(roster, |e| {
                e.character.is_evil()
                    && e.character != Character::Oberon
                    && e.player_name != viewer_name
            });
            (allies, evil_message(character))
        }
    };

    Reveal {
        character,
        allegiance: character.allegiance(),
        revealed_players,
        message,
    }
}

fn names(roster: &[RosterEntry], keep: impl Fn(&RosterEntry) -> bool) -> Vec<String> {
    roster
        .iter()
        .filter(|e| keep(e))
        .map(|e| e.player_name.clone())
        .collect()
}

fn evil_message(character: Character) -> String {
    match character {
        Character::Assassin => {
            "You are the Assassin, a Minion of Mordred. You know your fellow \
             agents of Evil (except Oberon). If Good wins, you can assassinate \
             Merlin to win the game!"
        }
        Character::Mordred => {
            "You are Mordred, a Minion of Mordred. You know your fellow agents \
             of Evil (except Oberon). Your identity is hidden from Merlin!"
        }
        Character::Morgana => {
            "You are Morgana, a Minion of Mordred. You know your fellow agents \
             of Evil (except Oberon). You appear as Merlin to Percival!"
        }
        _ => {
            "You are a Minion of Mordred. You know your fellow agents of Evil \
             (except Oberon)."
        }
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, character: Character) -> RosterEntry {
        RosterEntry {
            player_name: name.to_string(),
            character,
        }
    }

    /// 7-player roster with every optional Evil character in play:
    /// merlin, percival, servant / assassin, mordred, oberon, morgana.
    fn full_roster() -> Vec<RosterEntry> {
        vec![
            entry("alice", Character::Merlin),
            entry("bob", Character::Percival),
            entry("carol", Character::LoyalServant),
            entry("dave", Character::Assassin),
            entry("erin", Character::Mordred),
            entry("frank", Character::Oberon),
            entry("grace", Character::Morgana),
        ]
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn test_merlin_sees_evil_except_mordred() {
        let reveal = reveal_for("alice", Character::Merlin, &full_roster());
        assert_eq!(reveal.allegiance, Allegiance::Good);
        // dave (Assassin), frank (Oberon), grace (Morgana) — not erin (Mordred).
        assert_eq!(
            sorted(reveal.revealed_players),
            vec!["dave", "frank", "grace"]
        );
    }

    #[test]
    fn test_merlin_sees_oberon() {
        // Oberon hides from Evil, not from Merlin.
        let reveal = reveal_for("alice", Character::Merlin, &full_roster());
        assert!(reveal.revealed_players.contains(&"frank".to_string()));
    }

    #[test]
    fn test_percival_sees_merlin_and_morgana_together() {
        let reveal = reveal_for("bob", Character::Percival, &full_roster());
        assert_eq!(sorted(reveal.revealed_players), vec!["alice", "grace"]);
    }

    #[test]
    fn test_percival_sees_only_merlin_without_morgana() {
        let roster = vec![
            entry("alice", Character::Merlin),
            entry("bob", Character::Percival),
            entry("carol", Character::LoyalServant),
            entry("dave", Character::Assassin),
            entry("erin", Character::MinionOfMordred),
        ];
        let reveal = reveal_for("bob", Character::Percival, &roster);
        assert_eq!(reveal.revealed_players, vec!["alice"]);
    }

    #[test]
    fn test_loyal_servant_sees_nobody() {
        let reveal = reveal_for("carol", Character::LoyalServant, &full_roster());
        assert_eq!(reveal.allegiance, Allegiance::Good);
        assert!(reveal.revealed_players.is_empty());
        assert!(!reveal.message.is_empty());
    }

    #[test]
    fn test_oberon_sees_nobody() {
        let reveal = reveal_for("frank", Character::Oberon, &full_roster());
        assert_eq!(reveal.allegiance, Allegiance::Evil);
        assert!(reveal.revealed_players.is_empty());
    }

    #[test]
    fn test_oberon_is_hidden_from_other_evil() {
        for (name, character) in [
            ("dave", Character::Assassin),
            ("erin", Character::Mordred),
            ("grace", Character::Morgana),
        ] {
            let reveal = reveal_for(name, character, &full_roster());
            assert!(
                !reveal.revealed_players.contains(&"frank".to_string()),
                "{character} should not see Oberon"
            );
        }
    }

    #[test]
    fn test_evil_allies_are_evil_minus_oberon_minus_self() {
        let roster = full_roster();
        let evil_non_oberon = ["dave", "erin", "grace"];
        for (name, character) in [
            ("dave", Character::Assassin),
            ("erin", Character::Mordred),
            ("grace", Character::Morgana),
        ] {
            let reveal = reveal_for(name, character, &roster);
            let expected: Vec<String> = evil_non_oberon
                .iter()
                .filter(|n| **n != name)
                .map(|n| n.to_string())
                .collect();
            assert_eq!(sorted(reveal.revealed_players), expected, "viewer {name}");
        }
    }

    #[test]
    fn test_duplicate_minions_see_each_other() {
        // Self-exclusion is by name: two Minions are still allies.
        let roster = vec![
            entry("alice", Character::Merlin),
            entry("bob", Character::LoyalServant),
            entry("carol", Character::LoyalServant),
            entry("dave", Character::LoyalServant),
            entry("erin", Character::Assassin),
            entry("frank", Character::MinionOfMordred),
            entry("grace", Character::MinionOfMordred),
        ];
        let reveal = reveal_for("frank", Character::MinionOfMordred, &roster);
        assert_eq!(sorted(reveal.revealed_players), vec!["erin", "grace"]);
    }

    #[test]
    fn test_mordred_hidden_from_merlin_but_sees_allies() {
        let reveal = reveal_for("erin", Character::Mordred, &full_roster());
        assert_eq!(sorted(reveal.revealed_players), vec!["dave", "grace"]);
        assert!(reveal.message.contains("hidden from Merlin"));
    }

    #[test]
    fn test_reveal_reports_own_character_and_allegiance() {
        let reveal = reveal_for("dave", Character::Assassin, &full_roster());
        assert_eq!(reveal.character, Character::Assassin);
        assert_eq!(reveal.allegiance, Allegiance::Evil);
        assert!(reveal.message.contains("assassinate Merlin"));
    }
}
