//! Error types for grid mutation and state queries.

use super::Location;

/// Error raised when addressing or marking the grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// Row or column outside `0..=2`.
    #[display("Location ({row}, {col}) is outside the 3x3 grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square already holds a token.
    #[display("Square {_0} is already occupied")]
    Occupied(#[error(not(source))] Location),
}

/// Error raised by the round/game state machine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// A round winner was requested while the round is still being played.
    #[display("Round is still in progress")]
    RoundInProgress,

    /// A game winner was requested before all rounds were recorded.
    #[display("Game is still in progress ({played} of {total} rounds played)")]
    GameInProgress {
        /// Rounds recorded so far.
        played: usize,
        /// Configured round count.
        total: usize,
    },

    /// The computer was asked to move on a full grid.
    #[display("No legal move available")]
    NoLegalMove,
}
