//! Error types for the race rules engine.

use crate::player::PlayerColor;
use crate::state::GameState;

/// Error raised by game construction or by an operation used out of turn.
///
/// None of these are transient: each one signals a setup or usage
/// mistake by the caller driving the game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RaceError {
    /// Dice, face, or roster failed validation at construction.
    #[display("Configuration error: {}", _0)]
    Configuration(String),

    /// Operation invoked in a game state that forbids it.
    #[display("Cannot {} while game is in state {}", operation, state)]
    InvalidState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// State the game was in when the operation was attempted.
        state: GameState,
    },

    /// A face contains a piece that cannot be resolved.
    #[display("Malformed face: {}", _0)]
    MalformedFace(String),

    /// The named player is not on the active roster.
    #[display("Player {} is not an active player", _0)]
    UnknownPlayer(PlayerColor),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RaceError {}

impl RaceError {
    /// Builds an [`RaceError::InvalidState`] for `operation` in `state`.
    pub fn invalid_state(operation: &'static str, state: GameState) -> Self {
        Self::InvalidState { operation, state }
    }
}
