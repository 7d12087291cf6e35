//! The game aggregate and its turn orchestration.
//!
//! A [`Race3000Game`] moves through `init -> main -> finish`. All
//! mutation goes through `&mut self`, so a host that shares a game across
//! threads must serialize calls through a single owner.

use crate::dice::Dice;
use crate::error::RaceError;
use crate::player::{MAX_PLAYERS, Player, PlayerColor};
use crate::report::{Departure, DepartureReason, Roll, TurnReport};
use crate::resolver::TurnResolver;
use crate::state::{GameState, TurnState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A race for up to four players.
///
/// `R` is the randomness source for dice rolls; inject a seeded rng for
/// reproducible games.
#[derive(Debug, Clone)]
pub struct Race3000Game<R = StdRng> {
    entrants: Vec<PlayerColor>,
    players: Vec<Player>,
    dice: Dice,
    current: Option<PlayerColor>,
    state: GameState,
    turn_state: TurnState,
    departures: Vec<Departure>,
    history: Vec<TurnReport>,
    rng: R,
}

impl Race3000Game<StdRng> {
    /// Creates a game rolling from an OS-seeded rng.
    pub fn new(players: Vec<Player>, dice: Dice) -> Result<Self, RaceError> {
        Self::with_rng(players, dice, StdRng::from_os_rng())
    }

    /// Creates a game whose rolls are fully determined by `seed`.
    pub fn with_seed(players: Vec<Player>, dice: Dice, seed: u64) -> Result<Self, RaceError> {
        Self::with_rng(players, dice, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Race3000Game<R> {
    /// Creates a game in `init` with the given roster in turn order.
    #[instrument(skip(players, dice, rng), fields(player_count = players.len(), face_count = dice.len()))]
    pub fn with_rng(players: Vec<Player>, dice: Dice, rng: R) -> Result<Self, RaceError> {
        validate_roster(&players)?;
        info!("Creating race");
        Ok(Self {
            entrants: players.iter().map(Player::name).collect(),
            players,
            dice,
            current: None,
            state: GameState::Init,
            turn_state: TurnState::Move,
            departures: Vec::new(),
            history: Vec::new(),
            rng,
        })
    }

    /// Registers one more player at the end of the turn order.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn add_player(&mut self, player: Player) -> Result<(), RaceError> {
        if self.state != GameState::Init {
            warn!("Rejected registration outside init");
            return Err(RaceError::invalid_state("add a player", self.state));
        }
        let mut roster = self.players.clone();
        roster.push(player.clone());
        validate_roster(&roster)?;
        self.entrants.push(player.name());
        self.players = roster;
        Ok(())
    }

    /// Starts the race with the first registered player to act.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn start(&mut self) -> Result<(), RaceError> {
        if self.state != GameState::Init {
            warn!("Rejected start outside init");
            return Err(RaceError::invalid_state("start", self.state));
        }
        let first = self.players.first().map(Player::name).ok_or_else(|| {
            RaceError::Configuration("cannot start a race with no players".to_string())
        })?;
        self.dice.validate_players(&self.entrants)?;

        self.current = Some(first);
        self.state = GameState::Main;
        self.turn_state = TurnState::Move;
        info!(first = %first, players = self.players.len(), "Race started");
        self.check_invariants()
    }

    /// Plays the current player's turn.
    ///
    /// Rolls, resolves the face, and delivers pieces. Oil sets the
    /// player's skip flag; a pit stop grants one bonus roll right away.
    /// A player who delivers their last piece leaves the roster and the
    /// next player in turn order becomes current.
    ///
    /// Does not advance the turn otherwise; see [`Self::take_turn`].
    #[instrument(skip(self), fields(state = %self.state, current = ?self.current))]
    pub fn play_turn(&mut self) -> Result<TurnReport, RaceError> {
        if self.state != GameState::Main {
            warn!("Rejected turn outside main");
            return Err(RaceError::invalid_state("play a turn", self.state));
        }
        let acting = self.current.ok_or_else(|| {
            RaceError::InvariantViolation("no current player while in main".to_string())
        })?;

        self.turn_state = TurnState::Move;
        let mut rolls = Vec::new();
        let mut bonus_available = true;
        let pieces_left = loop {
            let roll = self.roll_for(acting)?;
            rolls.push(roll);
            let pieces_left = self.player(acting).map(Player::pieces_left).unwrap_or(0);
            if pieces_left == 0 {
                break pieces_left;
            }
            match roll.sub_state {
                TurnState::Move => break pieces_left,
                TurnState::Oil => {
                    self.turn_state = TurnState::Oil;
                    self.player_mut(acting)?.set_skip_next_turn(true);
                    debug!(player = %acting, "Oil: next turn will be skipped");
                    break pieces_left;
                }
                TurnState::Pit if bonus_available => {
                    self.turn_state = TurnState::Pit;
                    bonus_available = false;
                    debug!(player = %acting, "Pit stop: bonus roll");
                }
                TurnState::Pit => break pieces_left,
            }
        };
        self.turn_state = TurnState::Move;

        let finished = pieces_left == 0;
        let skip_next_turn = self
            .player(acting)
            .is_some_and(|p| p.skip_next_turn() && !finished);
        if finished {
            info!(player = %acting, "Player finished");
            self.remove(acting, DepartureReason::Finished)?;
        }

        let report = TurnReport {
            player: acting,
            rolls,
            pieces_left,
            finished,
            skip_next_turn,
        };
        debug!(report = %report, "Turn complete");
        self.history.push(report.clone());
        self.check_invariants()?;
        Ok(report)
    }

    /// Passes the turn to the next player in registration order.
    ///
    /// A player with a pending skip flag has it cleared and is passed
    /// over once. Returns the new current player, or `None` once no
    /// players remain and the race is finished.
    #[instrument(skip(self), fields(state = %self.state, current = ?self.current))]
    pub fn next_player(&mut self) -> Result<Option<PlayerColor>, RaceError> {
        if self.state != GameState::Main {
            warn!("Rejected next_player outside main");
            return Err(RaceError::invalid_state("advance to the next player", self.state));
        }
        if self.players.is_empty() {
            self.finish();
            return Ok(None);
        }
        let from = self
            .current
            .and_then(|c| self.position(c))
            .map_or(0, |i| (i + 1) % self.players.len());
        let next = self.select_from(from);
        self.current = Some(next);
        debug!(next = %next, "Turn passed");
        self.check_invariants()?;
        Ok(self.current)
    }

    /// Removes `player` from the roster before they finish.
    ///
    /// If they were current, the player who would have been next in the
    /// original order takes over, skip flags applying as in
    /// [`Self::next_player`]. An emptied roster finishes the race.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn remove_player(&mut self, player: PlayerColor) -> Result<(), RaceError> {
        self.remove(player, DepartureReason::Retired)?;
        self.check_invariants()
    }

    /// Plays a turn, then passes it on unless the actor already left.
    pub fn take_turn(&mut self) -> Result<TurnReport, RaceError> {
        let report = self.play_turn()?;
        if !report.finished && self.state == GameState::Main {
            self.next_player()?;
        }
        Ok(report)
    }

    /// Takes turns until the race finishes or `max_turns` have been played.
    ///
    /// Returns the number of turns played.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn run_to_finish(&mut self, max_turns: usize) -> Result<usize, RaceError> {
        if self.state != GameState::Main {
            return Err(RaceError::invalid_state("run the race", self.state));
        }
        let mut turns = 0;
        while self.state == GameState::Main && turns < max_turns {
            self.take_turn()?;
            turns += 1;
        }
        if self.state == GameState::Main {
            warn!(turns, "Turn limit reached before the race finished");
        }
        Ok(turns)
    }

    fn roll_for(&mut self, acting: PlayerColor) -> Result<Roll, RaceError> {
        let (face_index, face) = self.dice.roll(&mut self.rng);
        let resolution = TurnResolver::new(&self.entrants).resolve(face)?;
        let left = self
            .player_mut(acting)?
            .advance(resolution.pieces_advanced);
        debug!(player = %acting, face_index, advanced = resolution.pieces_advanced, left, "Roll resolved");
        Ok(Roll {
            face_index,
            pieces_advanced: resolution.pieces_advanced,
            sub_state: resolution.next_sub_state,
        })
    }
}

impl<R> Race3000Game<R> {
    /// Current lifecycle state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current turn sub-phase.
    pub fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    /// Identity of the player to act, if the race is running.
    pub fn current(&self) -> Option<PlayerColor> {
        self.current
    }

    /// The player to act, if the race is running.
    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|c| self.player(c))
    }

    /// Active players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up an active player.
    pub fn player(&self, color: PlayerColor) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == color)
    }

    /// Every player registered when the race started, in registration
    /// order. Players unregistered during `init` are not listed.
    pub fn entrants(&self) -> &[PlayerColor] {
        &self.entrants
    }

    /// The dice in play.
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// Players who left the roster, in the order they left.
    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    /// Finishers in finishing order.
    pub fn standings(&self) -> Vec<PlayerColor> {
        self.departures
            .iter()
            .filter(|d| d.reason == DepartureReason::Finished)
            .map(|d| d.player)
            .collect()
    }

    /// Reports of every turn played so far.
    pub fn history(&self) -> &[TurnReport] {
        &self.history
    }

    /// Serializable view of the game for a front end.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            turn_state: self.turn_state,
            current: self.current,
            players: self.players.clone(),
            departures: self.departures.clone(),
        }
    }

    fn position(&self, color: PlayerColor) -> Option<usize> {
        self.players.iter().position(|p| p.name() == color)
    }

    fn player_mut(&mut self, color: PlayerColor) -> Result<&mut Player, RaceError> {
        self.players
            .iter_mut()
            .find(|p| p.name() == color)
            .ok_or(RaceError::UnknownPlayer(color))
    }

    /// Picks the first player at or after `from` without a pending skip,
    /// clearing the flags it passes over. The roster must be non-empty.
    fn select_from(&mut self, from: usize) -> PlayerColor {
        let len = self.players.len();
        let mut index = from % len;
        while self.players[index].skip_next_turn() {
            self.players[index].set_skip_next_turn(false);
            info!(player = %self.players[index].name(), "Skipping turn (oil)");
            index = (index + 1) % len;
        }
        self.players[index].name()
    }

    fn remove(&mut self, player: PlayerColor, reason: DepartureReason) -> Result<(), RaceError> {
        if self.state == GameState::Finish {
            warn!("Rejected removal after finish");
            return Err(RaceError::invalid_state("remove a player", self.state));
        }
        let index = self
            .position(player)
            .ok_or(RaceError::UnknownPlayer(player))?;
        self.players.remove(index);
        if self.state == GameState::Init {
            // Roster editing before the start leaves no trace.
            self.entrants.retain(|&c| c != player);
            info!(player = %player, remaining = self.players.len(), "Player unregistered");
            return Ok(());
        }
        self.departures.push(Departure { player, reason });
        info!(player = %player, ?reason, remaining = self.players.len(), "Player left the race");

        if self.players.is_empty() {
            if self.state == GameState::Main {
                self.finish();
            }
        } else if self.current == Some(player) {
            // The original next player now sits at `index`.
            self.current = Some(self.select_from(index));
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.current = None;
        self.state = GameState::Finish;
        self.turn_state = TurnState::Move;
        info!(standings = ?self.standings(), "Race finished");
    }

    fn check_invariants(&self) -> Result<(), RaceError> {
        #[cfg(debug_assertions)]
        {
            use crate::invariants::{InvariantSet, RaceInvariants};
            RaceInvariants::check_all(self).map_err(|violations| {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                RaceError::InvariantViolation(descriptions)
            })?;
        }
        Ok(())
    }
}

/// Read-only view of a game, for presentation and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Lifecycle state.
    pub state: GameState,
    /// Turn sub-phase.
    pub turn_state: TurnState,
    /// Player to act.
    pub current: Option<PlayerColor>,
    /// Active players in turn order.
    pub players: Vec<Player>,
    /// Players who left, in order.
    pub departures: Vec<Departure>,
}

fn validate_roster(players: &[Player]) -> Result<(), RaceError> {
    if players.len() > MAX_PLAYERS {
        return Err(RaceError::Configuration(format!(
            "at most {} players can race, got {}",
            MAX_PLAYERS,
            players.len()
        )));
    }
    for (i, player) in players.iter().enumerate() {
        if players[..i].iter().any(|p| p.name() == player.name()) {
            return Err(RaceError::Configuration(format!(
                "player {} registered twice",
                player.name()
            )));
        }
    }
    Ok(())
}
