//! Core domain types for tic-tac-toe.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Opaque marker owned by one side of the game.
///
/// Tokens are supplied by the data service; only equality is meaningful.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Creates a token from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A square on the tic-tac-toe grid.
///
/// Serialized as `null` when empty and as the token string otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Token>", into = "Option<Token>")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a token.
    Occupied(Token),
}

impl Square {
    /// Returns the occupying token, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Square::Empty => None,
            Square::Occupied(token) => Some(token),
        }
    }

    /// Returns true if nothing has been placed here.
    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }
}

impl From<Option<Token>> for Square {
    fn from(value: Option<Token>) -> Self {
        match value {
            // The data service stores unmarked cells as falsy values.
            Some(token) if !token.as_str().is_empty() => Square::Occupied(token),
            _ => Square::Empty,
        }
    }
}

impl From<Square> for Option<Token> {
    fn from(value: Square) -> Self {
        match value {
            Square::Empty => None,
            Square::Occupied(token) => Some(token),
        }
    }
}

/// One side of a human-versus-computer game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// The person at the keyboard.
    Human,
    /// The random-move opponent.
    Computer,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// Winner of a round or of a whole game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The human side won.
    Human,
    /// The computer side won.
    Computer,
    /// Nobody won.
    Draw,
}

impl From<Side> for Outcome {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Outcome::Human,
            Side::Computer => Outcome::Computer,
        }
    }
}

/// The pair of tokens configured for a game.
///
/// Deserialization runs the same checks as [`Tokens::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TokenPair")]
pub struct Tokens {
    #[serde(rename = "humanToken")]
    human: Token,
    #[serde(rename = "computerToken")]
    computer: Token,
}

impl Tokens {
    /// Creates a token pair.
    ///
    /// Both tokens must be non-empty and distinct, otherwise the grid could
    /// not tell the two sides apart.
    #[instrument(skip(human, computer))]
    pub fn new(human: impl Into<Token>, computer: impl Into<Token>) -> Result<Self, ConfigError> {
        let human = human.into();
        let computer = computer.into();
        if human.as_str().is_empty() || computer.as_str().is_empty() {
            return Err(ConfigError::new("Tokens must not be empty".to_string()));
        }
        if human == computer {
            return Err(ConfigError::new(format!(
                "Human and computer tokens must differ (both are {:?})",
                human.as_str()
            )));
        }
        Ok(Self { human, computer })
    }

    /// Returns the human's token.
    pub fn human(&self) -> &Token {
        &self.human
    }

    /// Returns the computer's token.
    pub fn computer(&self) -> &Token {
        &self.computer
    }

    /// Returns the token used by `side`.
    pub fn of(&self, side: Side) -> &Token {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    /// Maps a token back to the side that owns it.
    pub fn side_of(&self, token: &Token) -> Option<Side> {
        if *token == self.human {
            Some(Side::Human)
        } else if *token == self.computer {
            Some(Side::Computer)
        } else {
            None
        }
    }
}

/// Unvalidated token fields as they arrive from the data service.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPair {
    human_token: Token,
    computer_token: Token,
}

impl TryFrom<TokenPair> for Tokens {
    type Error = ConfigError;

    fn try_from(pair: TokenPair) -> Result<Self, Self::Error> {
        Self::new(pair.human_token, pair.computer_token)
    }
}
