//! Finish invariant: the race ends exactly when the roster empties.

use super::Invariant;
use crate::{GameState, Race3000Game};

/// Invariant: `finish` has no active players and `main` has at least one.
pub struct FinishMeansEmptyInvariant;

impl<R> Invariant<Race3000Game<R>> for FinishMeansEmptyInvariant {
    fn holds(game: &Race3000Game<R>) -> bool {
        match game.state() {
            GameState::Init => true,
            GameState::Main => !game.players().is_empty(),
            GameState::Finish => game.players().is_empty(),
        }
    }

    fn description() -> &'static str {
        "Race is finished exactly when no active players remain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dice, Face, Piece, Player, PlayerColor};

    #[test]
    fn test_holds_when_last_player_finishes() {
        let players = vec![Player::new(PlayerColor::White, 1)];
        let dice = Dice::new(vec![Face::new(vec![Piece::Movement(PlayerColor::White)])]).unwrap();
        let mut game = Race3000Game::with_seed(players, dice, 0).unwrap();
        game.start().unwrap();
        game.play_turn().unwrap();

        assert_eq!(game.state(), GameState::Finish);
        assert!(FinishMeansEmptyInvariant::holds(&game));
    }
}
