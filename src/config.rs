//! Game configuration.

use crate::games::tictactoe::Side;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds that make up a game.
    #[serde(default = "default_num_rounds")]
    num_rounds: usize,

    /// Token placed by the human.
    #[serde(default = "default_human_token")]
    human_token: String,

    /// Token placed by the computer.
    #[serde(default = "default_computer_token")]
    computer_token: String,

    /// Side that opens the first round.
    #[serde(default = "default_first_player")]
    first_player: Side,

    /// Seed for the computer's random source; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_num_rounds() -> usize {
    3
}

#[instrument]
fn default_human_token() -> String {
    "X".to_string()
}

#[instrument]
fn default_computer_token() -> String {
    "O".to_string()
}

#[instrument]
fn default_first_player() -> Side {
    Side::Human
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_rounds: default_num_rounds(),
            human_token: default_human_token(),
            computer_token: default_computer_token(),
            first_player: default_first_player(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            num_rounds = config.num_rounds,
            human_token = %config.human_token,
            computer_token = %config.computer_token,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Overrides the round count.
    pub fn with_num_rounds(mut self, num_rounds: usize) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    /// Overrides both tokens.
    pub fn with_tokens(mut self, human: impl Into<String>, computer: impl Into<String>) -> Self {
        self.human_token = human.into();
        self.computer_token = computer.into();
        self
    }

    /// Overrides the opening side.
    pub fn with_first_player(mut self, side: Side) -> Self {
        self.first_player = side;
        self
    }

    /// Overrides the random seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.num_rounds(), 3);
        assert_eq!(config.human_token(), "X");
        assert_eq!(config.computer_token(), "O");
        assert_eq!(*config.first_player(), Side::Human);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_rounds = 5").unwrap();
        writeln!(file, "computer_token = \"@\"").unwrap();
        writeln!(file, "first_player = \"computer\"").unwrap();
        writeln!(file, "seed = 11").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.num_rounds(), 5);
        assert_eq!(config.human_token(), "X");
        assert_eq!(config.computer_token(), "@");
        assert_eq!(*config.first_player(), Side::Computer);
        assert_eq!(*config.seed(), Some(11));
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::default()
            .with_tokens("cat", "dog")
            .with_num_rounds(1)
            .with_seed(Some(4));
        assert_eq!(config.human_token(), "cat");
        assert_eq!(config.computer_token(), "dog");
        assert_eq!(*config.num_rounds(), 1);
        assert_eq!(*config.seed(), Some(4));
    }

    #[test]
    fn test_from_file_missing() {
        let err = GameConfig::from_file("/nonexistent/impossible_ttt.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_rounds = \"many\"").unwrap();
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
