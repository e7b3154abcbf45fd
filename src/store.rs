//! In-memory data service.
//!
//! Stands in for the persistence layer: it owns the current game, applies
//! move requests, records rounds, and archives finished games.

use crate::games::tictactoe::{
    Game, GameRecord, GridError, MoveRequest, Round, RoundReport, Side, Token, is_game_over,
    is_round_over,
};
use crate::ports::{GameReporter, GameSource, MoveRegistrar};
use tracing::{debug, info, instrument, warn};

/// Error returned by the data service.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// No game has been started.
    #[display("No game in progress")]
    NoGame,

    /// The token belongs to neither side.
    #[display("Token {_0} is not part of this game")]
    UnknownToken(#[error(not(source))] Token),

    /// The token's side is not due to move.
    #[display("It is not the {_0} side's turn")]
    OutOfTurn(#[error(not(source))] Side),

    /// The round on the grid has already ended.
    #[display("The round has already ended")]
    RoundOver,

    /// Every round has been recorded.
    #[display("The game already has all its rounds")]
    GameComplete,

    /// The grid rejected the move.
    #[display("{_0}")]
    Grid(GridError),
}

impl From<GridError> for StoreError {
    fn from(err: GridError) -> Self {
        StoreError::Grid(err)
    }
}

/// Data service holding one current game and the archive of finished ones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    current: Option<Game>,
    archive: Vec<GameRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `game` the current game, replacing any unfinished one.
    #[instrument(skip(self, game), fields(num_rounds = game.num_rounds()))]
    pub fn start_game(&mut self, game: Game) {
        if self.current.is_some() {
            warn!("Replacing unfinished game");
        }
        info!(first_player = %game.first_player(), "Game started");
        self.current = Some(game);
    }

    /// Borrows the current game.
    pub fn current_game(&self) -> Option<&Game> {
        self.current.as_ref()
    }

    /// Finished games, oldest first.
    pub fn archive(&self) -> &[GameRecord] {
        &self.archive
    }

    /// Looks up a finished game by id.
    pub fn record(&self, id: &str) -> Option<&GameRecord> {
        self.archive.iter().find(|record| record.id() == id)
    }
}

impl GameSource for InMemoryStore {
    fn fetch_current_game(&self) -> Option<Game> {
        self.current.clone()
    }
}

impl MoveRegistrar for InMemoryStore {
    #[instrument(skip(self, request), fields(request = %request))]
    fn register_move(&mut self, request: MoveRequest) -> Result<(), StoreError> {
        let game = self.current.as_mut().ok_or(StoreError::NoGame)?;

        let side = game
            .tokens()
            .side_of(&request.token)
            .ok_or_else(|| StoreError::UnknownToken(request.token.clone()))?;
        if side != *game.next_player() {
            return Err(StoreError::OutOfTurn(side));
        }
        if is_game_over(game) {
            return Err(StoreError::GameComplete);
        }
        if is_round_over(game.current_squares()) {
            return Err(StoreError::RoundOver);
        }

        game.grid_mut().mark(request.location, request.token)?;
        game.set_next_player(side.opponent());
        debug!(%side, next = %side.opponent(), "Move registered");
        Ok(())
    }
}

impl GameReporter for InMemoryStore {
    #[instrument(skip(self, report), fields(winner = %report.winner))]
    fn round_over(&mut self, report: RoundReport) -> Result<(), StoreError> {
        let game = self.current.as_mut().ok_or(StoreError::NoGame)?;
        if is_game_over(game) {
            return Err(StoreError::GameComplete);
        }

        game.push_round(Round::new(report.board, report.winner));
        info!(
            played = game.rounds().len(),
            total = game.num_rounds(),
            next = %game.next_player(),
            "Round recorded"
        );
        Ok(())
    }

    #[instrument(skip(self, record))]
    fn game_over(&mut self, record: GameRecord, id: String) -> Result<(), StoreError> {
        if self.current.take().is_none() {
            return Err(StoreError::NoGame);
        }
        info!(%id, winner = %record.winner(), "Game archived");
        self.archive.push(record);
        Ok(())
    }
}
