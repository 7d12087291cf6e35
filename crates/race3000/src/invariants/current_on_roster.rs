//! Current-player invariant: whoever acts is on the active roster.

use super::Invariant;
use crate::{GameState, Race3000Game};

/// Invariant: in `main`, the current player is an active player.
///
/// Outside `main` there is no current player at all.
pub struct CurrentOnRosterInvariant;

impl<R> Invariant<Race3000Game<R>> for CurrentOnRosterInvariant {
    fn holds(game: &Race3000Game<R>) -> bool {
        match (game.state(), game.current()) {
            (GameState::Main, Some(current)) => game.player(current).is_some(),
            (GameState::Main, None) => false,
            (GameState::Init | GameState::Finish, current) => current.is_none(),
        }
    }

    fn description() -> &'static str {
        "Current player is on the active roster while the race runs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dice, Face, Player, PlayerColor};

    #[test]
    fn test_holds_after_current_player_removed() {
        let players = vec![
            Player::new(PlayerColor::Red, 1),
            Player::new(PlayerColor::Green, 1),
        ];
        let dice = Dice::new(vec![Face::blank()]).unwrap();
        let mut game = Race3000Game::with_seed(players, dice, 0).unwrap();
        assert!(CurrentOnRosterInvariant::holds(&game));

        game.start().unwrap();
        game.remove_player(PlayerColor::Red).unwrap();
        assert!(CurrentOnRosterInvariant::holds(&game));
        assert_eq!(game.current(), Some(PlayerColor::Green));
    }
}
