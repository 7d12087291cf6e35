//! Game and turn phase enumerations.
//!
//! Both are plain values so a front end can react to them, e.g. by
//! disabling input outside `main`/`move`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Overall lifecycle of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameState {
    /// Players are being registered; no turns have been played.
    #[default]
    Init,
    /// Turns are in progress.
    Main,
    /// No active players remain. Terminal.
    Finish,
}

/// Sub-phase within a single turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TurnState {
    /// Plain movement resolution of a rolled face.
    #[default]
    Move,
    /// Oil hazard: the acting player loses their next turn.
    Oil,
    /// Pit stop: the acting player rolls once more immediately.
    Pit,
}

impl TurnState {
    /// Returns true for the hazard/bonus sub-phases.
    pub fn is_sub_resolution(self) -> bool {
        matches!(self, TurnState::Oil | TurnState::Pit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_render_lowercase() {
        assert_eq!(GameState::Main.to_string(), "main");
        assert_eq!(TurnState::Oil.to_string(), "oil");
        assert_eq!("finish".parse::<GameState>(), Ok(GameState::Finish));
    }

    #[test]
    fn test_defaults_are_initial_phases() {
        assert_eq!(GameState::default(), GameState::Init);
        assert_eq!(TurnState::default(), TurnState::Move);
        assert!(!TurnState::Move.is_sub_resolution());
        assert!(TurnState::Pit.is_sub_resolution());
    }
}
