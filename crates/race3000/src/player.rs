//! Players and their fixed identity set.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::instrument;

/// Maximum number of players in one game.
pub const MAX_PLAYERS: usize = 4;

/// Identity of a player, drawn from a fixed set of four colors.
///
/// The lowercase name doubles as the style key a front end maps to
/// its own visuals. This crate never computes styling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerColor {
    /// Red player.
    Red,
    /// Green player.
    Green,
    /// Blue player.
    Blue,
    /// White player.
    White,
}

impl PlayerColor {
    /// Stable identity string handed to presentation.
    pub fn style_key(self) -> &'static str {
        self.into()
    }
}

/// A participant in the race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: PlayerColor,
    pieces_left: u32,
    #[serde(default)]
    skip_next_turn: bool,
}

impl Player {
    /// Creates a player with `pieces` still to deliver.
    #[instrument]
    pub fn new(name: PlayerColor, pieces: u32) -> Self {
        Self {
            name,
            pieces_left: pieces,
            skip_next_turn: false,
        }
    }

    /// Returns the player's identity.
    pub fn name(&self) -> PlayerColor {
        self.name
    }

    /// Pieces not yet delivered.
    pub fn pieces_left(&self) -> u32 {
        self.pieces_left
    }

    /// Whether an oil hazard costs this player their next turn.
    pub fn skip_next_turn(&self) -> bool {
        self.skip_next_turn
    }

    /// See [`PlayerColor::style_key`].
    pub fn style_key(&self) -> &'static str {
        self.name.style_key()
    }

    /// True once every piece has been delivered.
    pub fn has_finished(&self) -> bool {
        self.pieces_left == 0
    }

    /// Delivers up to `count` pieces, flooring at zero. Returns the new count.
    pub(crate) fn advance(&mut self, count: u32) -> u32 {
        self.pieces_left = self.pieces_left.saturating_sub(count);
        self.pieces_left
    }

    pub(crate) fn set_skip_next_turn(&mut self, skip: bool) {
        self.skip_next_turn = skip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_color_set_is_fixed() {
        let all: Vec<_> = PlayerColor::iter().collect();
        assert_eq!(all.len(), MAX_PLAYERS);
        assert_eq!(all[0], PlayerColor::Red);
    }

    #[test]
    fn test_color_parses_any_case() {
        assert_eq!("Blue".parse::<PlayerColor>(), Ok(PlayerColor::Blue));
        assert_eq!("white".parse::<PlayerColor>(), Ok(PlayerColor::White));
        assert!("purple".parse::<PlayerColor>().is_err());
    }

    #[test]
    fn test_style_key_is_lowercase_identity() {
        let player = Player::new(PlayerColor::Green, 3);
        assert_eq!(player.style_key(), "green");
    }

    #[test]
    fn test_advance_floors_at_zero() {
        let mut player = Player::new(PlayerColor::Red, 2);
        assert_eq!(player.advance(1), 1);
        assert!(!player.has_finished());
        assert_eq!(player.advance(5), 0);
        assert!(player.has_finished());
    }
}
