//! Win detection logic for tic-tac-toe.

use super::super::{Grid, Location, Square, Token};
use tracing::{debug, instrument};

/// Three locations that win when held by one token.
pub type Line = [Location; 3];

/// The eight winning lines, in evaluation order.
pub const WINNING_LINES: [Line; 8] = [
    // Rows
    [Location::at(0, 0), Location::at(0, 1), Location::at(0, 2)],
    [Location::at(1, 0), Location::at(1, 1), Location::at(1, 2)],
    [Location::at(2, 0), Location::at(2, 1), Location::at(2, 2)],
    // Columns
    [Location::at(0, 0), Location::at(1, 0), Location::at(2, 0)],
    [Location::at(0, 1), Location::at(1, 1), Location::at(2, 1)],
    [Location::at(0, 2), Location::at(1, 2), Location::at(2, 2)],
    // Diagonals
    [Location::at(0, 0), Location::at(1, 1), Location::at(2, 2)],
    [Location::at(0, 2), Location::at(1, 1), Location::at(2, 0)],
];

/// A completed line and the token holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine<'a> {
    /// The three locations of the line.
    pub line: Line,
    /// The token occupying all three.
    pub token: &'a Token,
}

/// Finds the first winning line in [`WINNING_LINES`] order.
///
/// Returns `None` if no line is held by a single token. Empty squares never
/// form a line.
#[instrument(skip(grid))]
pub fn find_winning_line(grid: &Grid) -> Option<WinningLine<'_>> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        if let Square::Occupied(token) = grid.get(a)
            && grid.get(b) == grid.get(a)
            && grid.get(c) == grid.get(a)
        {
            debug!(%token, ?line, "Winning line found");
            return Some(WinningLine { line, token });
        }
    }

    None
}

/// Returns the token holding a winning line, if any.
pub fn find_winner(grid: &Grid) -> Option<&Token> {
    find_winning_line(grid).map(|winning| winning.token)
}
