//! The closed set of official characters and their allegiances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side a character fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allegiance {
    Good,
    Evil,
}

impl fmt::Display for Allegiance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Evil => write!(f, "Evil"),
        }
    }
}

/// An official character.
///
/// The enum is closed: a roster can never contain a character outside
/// the official set, so allegiance lookups are total and need no error
/// path.
///
/// Serialized as the official card names ("Loyal Servant", "Minion of
/// Mordred", ...) so clients display them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Merlin,
    Percival,
    #[serde(rename = "Loyal Servant")]
    LoyalServant,
    Assassin,
    Mordred,
    Oberon,
    Morgana,
    #[serde(rename = "Minion of Mordred")]
    MinionOfMordred,
}

impl Character {
    /// All official characters, Good first.
    pub const ALL: [Character; 8] = [
        Self::Merlin,
        Self::Percival,
        Self::LoyalServant,
        Self::Assassin,
        Self::Mordred,
        Self::Oberon,
        Self::Morgana,
        Self::MinionOfMordred,
    ];

    pub fn allegiance(self) -> Allegiance {
        match self {
            Self::Merlin | Self::Percival | Self::LoyalServant => Allegiance::Good,
            Self::Assassin
            | Self::Mordred
            | Self::Oberon
            | Self::Morgana
            | Self::MinionOfMordred => Allegiance::Evil,
        }
    }

    pub fn is_good(self) -> bool {
        self.allegiance() == Allegiance::Good
    }

    pub fn is_evil(self) -> bool {
        self.allegiance() == Allegiance::Evil
    }

    /// Filler characters may be held by any number of players at once.
    /// Every other character is unique within a room.
    pub fn is_filler(self) -> bool {
        matches!(self, Self::LoyalServant | Self::MinionOfMordred)
    }

    /// Characters that the host must explicitly enable before anyone
    /// may select them.
    pub fn requires_opt_in(self) -> bool {
        matches!(
            self,
            Self::Percival | Self::Mordred | Self::Oberon | Self::Morgana
        )
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Merlin => "Merlin",
            Self::Percival => "Percival",
            Self::LoyalServant => "Loyal Servant",
            Self::Assassin => "Assassin",
            Self::Mordred => "Mordred",
            Self::Oberon => "Oberon",
            Self::Morgana => "Morgana",
            Self::MinionOfMordred => "Minion of Mordred",
        };
        write!(f, "{name}")
    }
}
