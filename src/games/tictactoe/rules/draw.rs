//! Draw detection logic for tic-tac-toe.

use super::super::Grid;
use tracing::instrument;

/// Checks if the grid is full (all squares occupied).
///
/// A full grid with no winning line is a draw.
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.is_full()
}
