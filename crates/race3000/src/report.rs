//! Turn reports and roster departures.
//!
//! These are the domain events a game emits. They can be logged,
//! serialized for a front end, or replayed in tests.

use crate::player::PlayerColor;
use crate::state::TurnState;
use serde::{Deserialize, Serialize};

/// One resolved dice roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// Index of the face that came up.
    pub face_index: usize,
    /// Pieces credited by the face.
    pub pieces_advanced: u32,
    /// Sub-phase the face triggered.
    pub sub_state: TurnState,
}

/// Everything that happened during one player's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Player who acted.
    pub player: PlayerColor,
    /// The regular roll, followed by the pit-stop bonus roll if one was taken.
    pub rolls: Vec<Roll>,
    /// Pieces the player still has to deliver after the turn.
    pub pieces_left: u32,
    /// Whether the player finished and left the roster.
    pub finished: bool,
    /// Whether the player will lose their next turn to oil.
    pub skip_next_turn: bool,
}

impl TurnReport {
    /// Total pieces delivered this turn across all rolls.
    pub fn pieces_advanced(&self) -> u32 {
        self.rolls.iter().map(|r| r.pieces_advanced).sum()
    }

    /// True if a pit stop granted a bonus roll.
    pub fn took_bonus_roll(&self) -> bool {
        self.rolls.len() > 1
    }
}

impl std::fmt::Display for TurnReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.player)?;
        for roll in &self.rolls {
            write!(
                f,
                " face {} (+{}, {})",
                roll.face_index, roll.pieces_advanced, roll.sub_state
            )?;
        }
        write!(f, " -> {} left", self.pieces_left)?;
        if self.finished {
            write!(f, ", finished")?;
        }
        Ok(())
    }
}

/// Why a player left the active roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureReason {
    /// Delivered every piece.
    Finished,
    /// Removed by the caller before finishing.
    Retired,
}

/// A player leaving the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Player who left.
    pub player: PlayerColor,
    /// Why they left.
    pub reason: DepartureReason,
}
