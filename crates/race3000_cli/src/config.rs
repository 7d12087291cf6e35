//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use race3000::{Dice, Player, PlayerColor, Race3000Game, RaceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured seed.
pub const SEED_ENV: &str = "RACE3000_SEED";

/// Configuration for one race.
///
/// ```toml
/// players = ["red", "blue"]
/// starting_pieces = 4
/// seed = 7
/// dice = [
///   [{ kind = "movement", player = "red" }],
///   [{ kind = "special", effect = "turbo" }, { kind = "movement", player = "blue" }],
/// ]
/// ```
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Players in turn order.
    #[serde(default = "default_players")]
    players: Vec<PlayerColor>,

    /// Pieces each player starts with.
    #[serde(default = "default_starting_pieces")]
    starting_pieces: u32,

    /// Seed for dice rolls; OS entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Turn cap for simulated races.
    #[serde(default = "default_max_turns")]
    max_turns: usize,

    /// Dice faces; the standard dice for `players` when absent.
    #[serde(default)]
    dice: Option<Dice>,
}

fn default_players() -> Vec<PlayerColor> {
    vec![
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Blue,
        PlayerColor::White,
    ]
}

fn default_starting_pieces() -> u32 {
    5
}

fn default_max_turns() -> usize {
    500
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            starting_pieces: default_starting_pieces(),
            seed: None,
            max_turns: default_max_turns(),
            dice: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e)).in_file(path)
        })?;
        let config = Self::from_toml(&content).map_err(|e| e.in_file(path))?;
        info!(players = config.players.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies the seed override from the environment, if set.
    #[instrument(skip(self))]
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(raw) = std::env::var(SEED_ENV) {
            let seed = raw.trim().parse().map_err(|_| {
                ConfigError::new(format!("{} must be an unsigned integer, got {:?}", SEED_ENV, raw))
            })?;
            debug!(seed, "Seed taken from environment");
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Overrides the turn cap.
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        if let Some(max_turns) = max_turns {
            self.max_turns = max_turns;
        }
        self
    }

    /// The configured dice, or the standard dice for the roster.
    pub fn build_dice(&self) -> Result<Dice, RaceError> {
        match &self.dice {
            Some(dice) => Ok(dice.clone()),
            None => Dice::standard(&self.players),
        }
    }

    /// Builds a race in `init` from this configuration.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn build_game(&self) -> Result<Race3000Game, RaceError> {
        let players = self
            .players
            .iter()
            .map(|&color| Player::new(color, self.starting_pieces))
            .collect();
        let dice = self.build_dice()?;
        match self.seed {
            Some(seed) => Race3000Game::with_seed(players, dice, seed),
            None => Race3000Game::new(players, dice),
        }
    }
}

/// A race configuration that could not be loaded.
///
/// Records where in this crate the failure was raised, and the file
/// being read when there was one.
#[derive(Debug, Clone, Display, Error)]
#[display("Race config {}: {} (raised at {}:{})", path.as_deref().unwrap_or("<inline>"), message, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub message: String,
    /// Config file being loaded, if any.
    pub path: Option<String>,
    /// Line of the raising call.
    pub line: u32,
    /// Source file of the raising call.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates an error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Attaches the config file the error came from.
    pub fn in_file(mut self, path: &Path) -> Self {
        self.path = Some(path.display().to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use race3000::{GameState, Piece, SpecialEffect};
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = GameConfig::from_toml("players = [\"red\", \"blue\"]").unwrap();
        assert_eq!(config.players(), &vec![PlayerColor::Red, PlayerColor::Blue]);
        assert_eq!(*config.starting_pieces(), 5);
        assert_eq!(*config.max_turns(), 500);
        assert!(config.seed().is_none());
        assert_eq!(config.build_dice().unwrap().len(), race3000::STANDARD_FACES);
    }

    #[test]
    fn test_dice_parsed_from_inline_tables() {
        let config = GameConfig::from_toml(
            r#"
            players = ["green"]
            dice = [
              [{ kind = "special", effect = "turbo" }, { kind = "movement", player = "green" }],
              [{ kind = "empty" }],
            ]
            "#,
        )
        .unwrap();
        let dice = config.build_dice().unwrap();
        assert_eq!(dice.len(), 2);
        assert_eq!(
            dice.face(0).unwrap().pieces(),
            &[
                Piece::Special(SpecialEffect::Turbo),
                Piece::Movement(PlayerColor::Green)
            ]
        );
    }

    #[test]
    fn test_malformed_piece_rejected() {
        let err = GameConfig::from_toml("dice = [[{ kind = \"movement\" }]]").unwrap_err();
        assert!(err.message.contains("Malformed face"));
    }

    #[test]
    fn test_unknown_color_rejected() {
        assert!(GameConfig::from_toml("players = [\"purple\"]").is_err());
    }

    #[test]
    fn test_from_file_builds_seeded_game() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "players = [\"red\", \"white\"]\nseed = 11\nstarting_pieces = 2").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        let mut game = config.build_game().unwrap();
        assert_eq!(game.state(), GameState::Init);
        game.start().unwrap();
        assert_eq!(game.current(), Some(PlayerColor::Red));
        assert!(game.players().iter().all(|p| p.pieces_left() == 2));
    }

    #[test]
    fn test_missing_file_reports_location() {
        let err = GameConfig::from_file("/nonexistent/race3000.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
        assert!(err.file.ends_with("config.rs"));
        assert_eq!(err.path.as_deref(), Some("/nonexistent/race3000.toml"));
        assert!(err.to_string().starts_with("Race config /nonexistent/race3000.toml:"));
    }

    #[test]
    fn test_demo_config_runs_to_finish() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/race3000.toml");
        let config = GameConfig::from_file(path).unwrap();
        assert_eq!(*config.seed(), Some(3000));

        let mut game = config.build_game().unwrap();
        game.start().unwrap();
        game.run_to_finish(*config.max_turns()).unwrap();
        assert_eq!(game.state(), GameState::Finish);
        assert_eq!(game.standings().len(), 3);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::default()
            .with_seed(Some(3))
            .with_max_turns(Some(9))
            .with_seed(None);
        assert_eq!(*config.seed(), Some(3));
        assert_eq!(*config.max_turns(), 9);
    }
}
