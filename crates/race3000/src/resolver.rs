//! Turn resolution: interprets one rolled face for the acting player.

use crate::dice::Face;
use crate::error::RaceError;
use crate::piece::{Piece, SpecialEffect};
use crate::player::PlayerColor;
use crate::state::TurnState;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Factor applied by a turbo piece to the movement pieces after it.
pub const TURBO_MULTIPLIER: u32 = 2;

/// Result of resolving one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Pieces of progress credited to the acting player.
    pub pieces_advanced: u32,
    /// Sub-phase the turn moves into.
    pub next_sub_state: TurnState,
}

impl Resolution {
    /// The no-op result of an all-empty face.
    pub const NO_OP: Resolution = Resolution {
        pieces_advanced: 0,
        next_sub_state: TurnState::Move,
    };
}

/// Resolves faces against the players registered in a game.
///
/// Every movement piece on a face counts toward the acting player;
/// the piece's color only says whose move it scores on the board.
#[derive(Debug, Clone, Copy)]
pub struct TurnResolver<'a> {
    entrants: &'a [PlayerColor],
}

impl<'a> TurnResolver<'a> {
    /// Creates a resolver for a game with the given entrants.
    pub fn new(entrants: &'a [PlayerColor]) -> Self {
        Self { entrants }
    }

    /// Resolves `face` in piece order.
    ///
    /// A turbo doubles each movement piece after it; a second turbo on
    /// the same face does not stack. The first oil or pit piece decides
    /// the sub-phase. Fails if a movement piece belongs to no entrant.
    #[instrument(skip(self, face), fields(face = %face))]
    pub fn resolve(&self, face: &Face) -> Result<Resolution, RaceError> {
        let mut multiplier = 1;
        let mut advanced = 0u32;
        let mut sub_state = TurnState::Move;

        for piece in face.pieces() {
            match *piece {
                Piece::Empty => {}
                Piece::Movement(player) => {
                    if !self.entrants.contains(&player) {
                        return Err(RaceError::MalformedFace(format!(
                            "movement piece for {} has no registered player",
                            player
                        )));
                    }
                    advanced = advanced.saturating_add(multiplier);
                }
                Piece::Special(SpecialEffect::Turbo) => multiplier = TURBO_MULTIPLIER,
                Piece::Special(SpecialEffect::Oil) => {
                    if sub_state == TurnState::Move {
                        sub_state = TurnState::Oil;
                    }
                }
                Piece::Special(SpecialEffect::Pit) => {
                    if sub_state == TurnState::Move {
                        sub_state = TurnState::Pit;
                    }
                }
            }
        }

        debug!(advanced, %sub_state, "Resolved face");
        Ok(Resolution {
            pieces_advanced: advanced,
            next_sub_state: sub_state,
        })
    }
}
