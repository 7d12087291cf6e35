//! Race 3000 rules engine.
//!
//! Models a turn-based, dice-driven race for up to four players. A dice
//! is a fixed list of faces, each face an ordered list of pieces. Each
//! turn the current player rolls, the face is resolved into delivered
//! pieces and an optional hazard or bonus, and players who deliver
//! every piece leave the race in finishing order.
//!
//! # Architecture
//!
//! - **Model**: [`Player`], [`Piece`], [`Face`], [`Dice`]
//! - **Resolution**: [`TurnResolver`] turns a rolled face into a [`Resolution`]
//! - **Orchestration**: [`Race3000Game`] runs `init -> main -> finish`
//! - **Invariants**: composable checks run after every mutation in debug builds
//!
//! Presentation is not part of this crate. A front end reads
//! [`PlayerColor::style_key`], [`Piece::effect`], and the plain
//! [`GameState`]/[`TurnState`] values and maps them to visuals itself.
//!
//! # Example
//!
//! ```
//! use race3000::{Dice, Face, Piece, Player, PlayerColor, Race3000Game};
//!
//! # fn main() -> Result<(), race3000::RaceError> {
//! let dice = Dice::new(vec![Face::new(vec![Piece::Movement(PlayerColor::Red)])])?;
//! let mut game = Race3000Game::with_seed(vec![Player::new(PlayerColor::Red, 2)], dice, 7)?;
//! game.start()?;
//! game.run_to_finish(10)?;
//! assert_eq!(game.standings(), vec![PlayerColor::Red]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dice;
mod error;
mod game;
pub mod invariants;
mod piece;
mod player;
mod report;
mod resolver;
mod state;

pub use dice::{Dice, Face, STANDARD_FACES};
pub use error::RaceError;
pub use game::{GameSnapshot, Race3000Game};
pub use piece::{Effect, Piece, PieceKind, PieceSpec, SpecialEffect};
pub use player::{MAX_PLAYERS, Player, PlayerColor};
pub use report::{Departure, DepartureReason, Roll, TurnReport};
pub use resolver::{Resolution, TURBO_MULTIPLIER, TurnResolver};
pub use state::{GameState, TurnState};
