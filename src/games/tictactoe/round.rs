//! Round engine: end-of-round detection and resolution.

use super::rules::{find_winner, is_full};
use super::{GameError, Grid, Outcome, Tokens};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A completed round: the final grid and who won it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Round {
    /// Snapshot of the grid when the round ended.
    pub board: Grid,
    /// Round result.
    pub winner: Outcome,
}

/// Returns true if some token holds a winning line or the grid is full.
#[instrument(skip(grid))]
pub fn is_round_over(grid: &Grid) -> bool {
    find_winner(grid).is_some() || is_full(grid)
}

/// Resolves the winner of a finished round.
///
/// The win check runs before the draw check, so a full grid with a winning
/// line is a win. A winning token that belongs to neither side resolves as a
/// draw.
///
/// # Errors
///
/// [`GameError::RoundInProgress`] if [`is_round_over`] is false.
#[instrument(skip(grid, tokens))]
pub fn round_winner(grid: &Grid, tokens: &Tokens) -> Result<Outcome, GameError> {
    if !is_round_over(grid) {
        warn!("Round winner requested before the round ended");
        return Err(GameError::RoundInProgress);
    }

    let outcome = match find_winner(grid) {
        Some(token) => match tokens.side_of(token) {
            Some(side) => Outcome::from(side),
            None => {
                warn!(%token, "Winning token belongs to neither side");
                Outcome::Draw
            }
        },
        None => Outcome::Draw,
    };

    debug!(%outcome, "Round resolved");
    Ok(outcome)
}
