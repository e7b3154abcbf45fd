//! Multi-round game state and the game aggregator.
//!
//! A [`Game`] is owned by the data service. The functions here only read it:
//! [`is_game_over`] and [`game_winner`] aggregate completed rounds and
//! [`finalize_game`] produces the terminal [`GameRecord`].

use super::{GameError, Grid, Outcome, Round, Side, Token, Tokens};
use crate::capabilities::{Clock, IdGenerator};
use crate::config::{ConfigError, GameConfig};
use chrono::{DateTime, SecondsFormat, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A game in progress: configuration, the current grid, and finished rounds.
///
/// Deserializes from the data service's game document. Extra fields such as
/// `winner` or `finishDateTime` are ignored, and `firstPlayer` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GameDocument")]
pub struct Game {
    /// Number of rounds that complete the game.
    num_rounds: usize,
    /// Human and computer tokens.
    #[serde(flatten)]
    tokens: Tokens,
    /// Side that opens the first round.
    first_player: Side,
    /// Side whose move is next.
    next_player: Side,
    /// Grid of the round being played.
    current_squares: Grid,
    /// Completed rounds, oldest first.
    rounds: Vec<Round>,
    /// When the game was created, if known.
    #[serde(rename = "startDateTime")]
    started_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Creates a game with an empty grid and no rounds played.
    #[instrument(skip(tokens))]
    pub fn new(num_rounds: usize, tokens: Tokens, first_player: Side) -> Result<Self, ConfigError> {
        if num_rounds == 0 {
            return Err(ConfigError::new("A game needs at least one round".to_string()));
        }
        Ok(Self {
            num_rounds,
            tokens,
            first_player,
            next_player: first_player,
            current_squares: Grid::new(),
            rounds: Vec::new(),
            started_at: None,
        })
    }

    /// Creates a game from configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let tokens = Tokens::new(config.human_token().as_str(), config.computer_token().as_str())?;
        Self::new(*config.num_rounds(), tokens, *config.first_player())
    }

    /// Stamps the game with its creation time.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Replaces the rounds played so far.
    pub fn with_rounds(mut self, rounds: Vec<Round>) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replaces the grid of the round being played.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.current_squares = grid;
        self
    }

    /// Sets whose move is next.
    pub fn with_next_player(mut self, side: Side) -> Self {
        self.next_player = side;
        self
    }

    /// Returns the token of the side due to move.
    pub fn next_token(&self) -> &Token {
        self.tokens.of(self.next_player)
    }

    /// Tallies the outcomes of completed rounds.
    pub fn score(&self) -> Scoreboard {
        self.rounds
            .iter()
            .fold(Scoreboard::default(), |mut score, round| {
                match round.winner {
                    Outcome::Human => score.human += 1,
                    Outcome::Computer => score.computer += 1,
                    Outcome::Draw => score.draws += 1,
                }
                score
            })
    }

    /// Side that opens round number `index` (zero-based).
    ///
    /// Openers alternate, starting with the configured first player.
    pub fn opener_of_round(&self, index: usize) -> Side {
        if index % 2 == 0 {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.current_squares
    }

    pub(crate) fn set_next_player(&mut self, side: Side) {
        self.next_player = side;
    }

    /// Appends a finished round and prepares the grid for the next one.
    pub(crate) fn push_round(&mut self, round: Round) {
        self.rounds.push(round);
        self.current_squares = Grid::new();
        self.next_player = self.opener_of_round(self.rounds.len());
    }
}

/// Unvalidated game document as stored by the data service.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameDocument {
    num_rounds: usize,
    human_token: Token,
    computer_token: Token,
    first_player: Option<Side>,
    next_player: Side,
    #[serde(default)]
    current_squares: Grid,
    #[serde(default)]
    rounds: Vec<Round>,
    #[serde(default)]
    start_date_time: Option<DateTime<Utc>>,
}

impl TryFrom<GameDocument> for Game {
    type Error = ConfigError;

    fn try_from(doc: GameDocument) -> Result<Self, Self::Error> {
        if doc.rounds.len() > doc.num_rounds {
            return Err(ConfigError::new(format!(
                "Game records {} rounds but was configured for {}",
                doc.rounds.len(),
                doc.num_rounds
            )));
        }
        let tokens = Tokens::new(doc.human_token, doc.computer_token)?;
        let first_player = doc.first_player.unwrap_or_else(|| {
            infer_first_player(doc.next_player, &doc.current_squares, doc.rounds.len())
        });
        let mut game = Self::new(doc.num_rounds, tokens, first_player)?
            .with_grid(doc.current_squares)
            .with_rounds(doc.rounds)
            .with_next_player(doc.next_player);
        game.started_at = doc.start_date_time;
        Ok(game)
    }
}

/// Recovers the side that opened the game from a document without one.
///
/// Turns alternate within a round and openers alternate across rounds, so
/// the side due to move and the number of marks fix the opener.
fn infer_first_player(next_player: Side, grid: &Grid, rounds_played: usize) -> Side {
    let opener = if grid.filled_count() % 2 == 0 {
        next_player
    } else {
        next_player.opponent()
    };
    if rounds_played % 2 == 0 {
        opener
    } else {
        opener.opponent()
    }
}

/// Round tally for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by the human.
    pub human: usize,
    /// Rounds won by the computer.
    pub computer: usize,
    /// Drawn rounds.
    pub draws: usize,
}

impl Scoreboard {
    /// Strictly-greater win count takes the game; anything else is a draw.
    pub fn leader(&self) -> Outcome {
        match self.human.cmp(&self.computer) {
            std::cmp::Ordering::Greater => Outcome::Human,
            std::cmp::Ordering::Less => Outcome::Computer,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "human {} - computer {} ({} drawn)",
            self.human, self.computer, self.draws
        )
    }
}

/// Immutable record of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Unique identifier of the finished game.
    id: String,
    /// Configured round count.
    num_rounds: usize,
    /// Human and computer tokens.
    #[serde(flatten)]
    tokens: Tokens,
    /// Side that opened the first round.
    first_player: Side,
    /// Side that was due to move when the game ended.
    next_player: Side,
    /// Grid as it stood when the game ended.
    current_squares: Grid,
    /// Every round played.
    rounds: Vec<Round>,
    /// Overall result.
    winner: Outcome,
    /// When the game was created, if known.
    #[serde(rename = "startDateTime")]
    started_at: Option<DateTime<Utc>>,
    /// ISO-8601 completion timestamp.
    finish_date_time: String,
}

/// Returns true once the configured number of rounds has been recorded.
#[instrument(skip(game), fields(played = game.rounds.len(), total = game.num_rounds))]
pub fn is_game_over(game: &Game) -> bool {
    game.rounds.len() == game.num_rounds
}

/// Decides the overall winner of a completed game.
///
/// # Errors
///
/// [`GameError::GameInProgress`] if [`is_game_over`] is false.
#[instrument(skip(game))]
pub fn game_winner(game: &Game) -> Result<Outcome, GameError> {
    if !is_game_over(game) {
        return Err(GameError::GameInProgress {
            played: game.rounds.len(),
            total: game.num_rounds,
        });
    }
    Ok(game.score().leader())
}

/// Builds the terminal record for a completed game.
///
/// The record snapshots the configuration and round history, adds the
/// winner, a fresh id from `ids` and the completion time from `clock`.
///
/// # Errors
///
/// [`GameError::GameInProgress`] if the game is not over.
#[instrument(skip_all)]
pub fn finalize_game<I, C>(game: &Game, ids: &mut I, clock: &C) -> Result<GameRecord, GameError>
where
    I: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    let winner = game_winner(game)?;
    let id = ids.next_id();
    let finish_date_time = clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);

    info!(%id, %winner, score = %game.score(), "Game finalized");

    Ok(GameRecord {
        id,
        num_rounds: game.num_rounds,
        tokens: game.tokens.clone(),
        first_player: game.first_player,
        next_player: game.next_player,
        current_squares: game.current_squares.clone(),
        rounds: game.rounds.clone(),
        winner,
        started_at: game.started_at,
        finish_date_time,
    })
}
