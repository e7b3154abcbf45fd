//! Collaborator interfaces.
//!
//! The data service that owns the game implements these traits. The
//! orchestrator only reads a [`Game`] and hands back commands; applying them
//! is the collaborator's job.

use crate::games::tictactoe::{Game, GameRecord, MoveRequest, RoundReport};
use crate::store::StoreError;

/// Supplies the game currently being played.
pub trait GameSource {
    /// Returns the current game, or `None` before one has been delivered.
    fn fetch_current_game(&self) -> Option<Game>;
}

/// Applies moves to the current grid.
pub trait MoveRegistrar {
    /// Validates that the square is free and places the token.
    ///
    /// # Errors
    ///
    /// Returns an error when there is no game, the token is out of turn, or
    /// the square is taken.
    fn register_move(&mut self, request: MoveRequest) -> Result<(), StoreError>;
}

/// Persists finished rounds and games.
pub trait GameReporter {
    /// Records a finished round, resets the grid and hands the next round to
    /// its opener.
    fn round_over(&mut self, report: RoundReport) -> Result<(), StoreError>;

    /// Records a finished game under `id`.
    fn game_over(&mut self, record: GameRecord, id: String) -> Result<(), StoreError>;
}
