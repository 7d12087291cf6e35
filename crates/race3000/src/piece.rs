//! Pieces: the atomic units printed on a dice face.

use crate::error::RaceError;
use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Named side effect carried by a special piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SpecialEffect {
    /// Doubles the movement pieces that follow it on the same face.
    Turbo,
    /// Hazard: the acting player loses their next turn.
    Oil,
    /// Pit stop (also printed as a shortcut): one extra immediate roll.
    #[serde(alias = "shortcut")]
    #[strum(to_string = "pit", serialize = "shortcut")]
    Pit,
}

/// One piece on a face. The variant never changes after construction.
///
/// Movement pieces refer to their player by identity only; many faces
/// share the same player, and none of them can mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "PieceSpec", into = "PieceSpec")]
pub enum Piece {
    /// No effect.
    #[default]
    Empty,
    /// Credits one piece of progress, tied to a player.
    Movement(PlayerColor),
    /// A named special effect.
    Special(SpecialEffect),
}

/// Semantic effect of a piece, as seen by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Effect {
    /// Empty piece.
    None,
    /// Movement piece credited to `player`.
    Advance {
        /// Player the piece belongs to.
        player: PlayerColor,
    },
    /// Special piece.
    Special {
        /// Effect carried by the piece.
        name: SpecialEffect,
    },
}

impl Piece {
    /// Returns the piece's effect descriptor.
    pub fn effect(&self) -> Effect {
        match *self {
            Piece::Empty => Effect::None,
            Piece::Movement(player) => Effect::Advance { player },
            Piece::Special(name) => Effect::Special { name },
        }
    }

    /// Returns the variant tag.
    pub fn kind(&self) -> PieceKind {
        match self {
            Piece::Empty => PieceKind::Empty,
            Piece::Movement(_) => PieceKind::Movement,
            Piece::Special(_) => PieceKind::Special,
        }
    }

    /// Player this piece belongs to, if it is a movement piece.
    pub fn player(&self) -> Option<PlayerColor> {
        match self {
            Piece::Movement(player) => Some(*player),
            Piece::Empty | Piece::Special(_) => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Piece::Empty => write!(f, "-"),
            Piece::Movement(player) => write!(f, "{}", player),
            Piece::Special(effect) => write!(f, "*{}", effect),
        }
    }
}

/// Variant tag of a [`Piece`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PieceKind {
    /// See [`Piece::Empty`].
    Empty,
    /// See [`Piece::Movement`].
    Movement,
    /// See [`Piece::Special`].
    Special,
}

/// Loose wire form of a piece, as written in configuration files.
///
/// ```toml
/// { kind = "movement", player = "red" }
/// { kind = "special", effect = "turbo" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSpec {
    /// Variant tag.
    pub kind: PieceKind,
    /// Owning player, required for movement pieces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerColor>,
    /// Effect name, required for special pieces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<SpecialEffect>,
}

impl TryFrom<PieceSpec> for Piece {
    type Error = RaceError;

    fn try_from(spec: PieceSpec) -> Result<Self, Self::Error> {
        match spec.kind {
            PieceKind::Empty => Ok(Piece::Empty),
            PieceKind::Movement => spec.player.map(Piece::Movement).ok_or_else(|| {
                RaceError::MalformedFace("movement piece has no player".to_string())
            }),
            PieceKind::Special => spec.effect.map(Piece::Special).ok_or_else(|| {
                RaceError::MalformedFace("special piece has no effect name".to_string())
            }),
        }
    }
}

impl From<Piece> for PieceSpec {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind(),
            player: piece.player(),
            effect: match piece {
                Piece::Special(effect) => Some(effect),
                Piece::Empty | Piece::Movement(_) => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_descriptor_per_variant() {
        assert_eq!(Piece::Empty.effect(), Effect::None);
        assert_eq!(
            Piece::Movement(PlayerColor::Red).effect(),
            Effect::Advance {
                player: PlayerColor::Red
            }
        );
        assert_eq!(
            Piece::Special(SpecialEffect::Oil).effect(),
            Effect::Special {
                name: SpecialEffect::Oil
            }
        );
    }

    #[test]
    fn test_shortcut_is_a_pit_stop() {
        assert_eq!("shortcut".parse::<SpecialEffect>(), Ok(SpecialEffect::Pit));
        assert_eq!("pit".parse::<SpecialEffect>(), Ok(SpecialEffect::Pit));
        assert_eq!(SpecialEffect::Pit.to_string(), "pit");
    }

    #[test]
    fn test_movement_spec_without_player_is_malformed() {
        let spec = PieceSpec {
            kind: PieceKind::Movement,
            player: None,
            effect: None,
        };
        assert!(matches!(
            Piece::try_from(spec),
            Err(RaceError::MalformedFace(_))
        ));
    }

    #[test]
    fn test_special_spec_without_effect_is_malformed() {
        let spec = PieceSpec {
            kind: PieceKind::Special,
            player: None,
            effect: None,
        };
        assert!(Piece::try_from(spec).is_err());
    }

    #[test]
    fn test_spec_ignores_irrelevant_fields() {
        let spec = PieceSpec {
            kind: PieceKind::Empty,
            player: Some(PlayerColor::Blue),
            effect: Some(SpecialEffect::Turbo),
        };
        assert_eq!(Piece::try_from(spec), Ok(Piece::Empty));
    }
}
