//! Unique roster invariant: no player is registered twice.

use super::Invariant;
use crate::Race3000Game;

/// Invariant: every active player appears exactly once.
pub struct UniqueRosterInvariant;

impl<R> Invariant<Race3000Game<R>> for UniqueRosterInvariant {
    fn holds(game: &Race3000Game<R>) -> bool {
        let players = game.players();
        players
            .iter()
            .enumerate()
            .all(|(i, p)| players[..i].iter().all(|q| q.name() != p.name()))
    }

    fn description() -> &'static str {
        "Each active player appears once in turn order"
    }
}
