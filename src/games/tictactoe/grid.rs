//! The 3x3 playing grid.

use super::{GridError, Location, Square, Token, location::GRID_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// 3x3 tic-tac-toe grid.
///
/// Marks are monotonic: once a square is occupied it is never cleared or
/// overwritten. A fresh grid is created for every round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: [[Square; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from nested rows, `None` (or an empty string) meaning unmarked.
    pub fn from_rows<T: Into<Token>>(rows: [[Option<T>; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self {
            rows: rows.map(|row| row.map(|cell| Square::from(cell.map(Into::<Token>::into)))),
        }
    }

    /// Returns the square at `location`.
    pub fn get(&self, location: Location) -> &Square {
        &self.rows[location.row()][location.col()]
    }

    /// Places `token` at `location`.
    #[instrument(skip(self))]
    pub fn mark(&mut self, location: Location, token: Token) -> Result<(), GridError> {
        let square = &mut self.rows[location.row()][location.col()];
        if !square.is_empty() {
            return Err(GridError::Occupied(location));
        }
        trace!(%location, %token, "Marking square");
        *square = Square::Occupied(token);
        Ok(())
    }

    /// Returns the unmarked locations in row-major order.
    pub fn unmarked(&self) -> Vec<Location> {
        Location::ALL
            .iter()
            .copied()
            .filter(|location| self.get(*location).is_empty())
            .collect()
    }

    /// Counts occupied squares.
    pub fn filled_count(&self) -> usize {
        self.squares().filter(|square| !square.is_empty()).count()
    }

    /// Returns true when every square is occupied.
    pub fn is_full(&self) -> bool {
        self.filled_count() == GRID_SIZE * GRID_SIZE
    }

    /// Iterates squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.rows.iter().flatten()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for location in Location::ALL {
            match self.get(location) {
                Square::Empty => write!(f, "{}", location.to_index() + 1)?,
                Square::Occupied(token) => write!(f, "{}", token)?,
            }
            if location.col() < GRID_SIZE - 1 {
                write!(f, "|")?;
            } else if location.row() < GRID_SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(row: usize, col: usize) -> Location {
        Location::new(row, col).unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.unmarked(), Location::ALL.to_vec());
        assert!(!grid.is_full());
    }

    #[test]
    fn test_mark_is_monotonic() {
        let mut grid = Grid::new();
        grid.mark(loc(1, 1), Token::from("X")).unwrap();
        assert_eq!(
            grid.mark(loc(1, 1), Token::from("O")),
            Err(GridError::Occupied(loc(1, 1)))
        );
        assert_eq!(grid.get(loc(1, 1)), &Square::Occupied(Token::from("X")));
    }

    #[test]
    fn test_unmarked_row_major() {
        let grid = Grid::from_rows([
            [Some("X"), None, Some("O")],
            [None, Some("X"), None],
            [Some("O"), Some("O"), None],
        ]);
        assert_eq!(grid.unmarked(), vec![loc(0, 1), loc(1, 0), loc(1, 2), loc(2, 2)]);
        assert_eq!(grid.filled_count(), 5);
    }

    #[test]
    fn test_from_rows_treats_empty_string_as_unmarked() {
        let grid = Grid::from_rows([
            [Some(""), None, None],
            [None, None, None],
            [None, None, None],
        ]);
        assert!(grid.get(loc(0, 0)).is_empty());
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows([
            [Some("X"), None, None],
            [None, Some("O"), None],
            [None, None, None],
        ]);
        assert_eq!(grid.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_serializes_as_nested_rows() {
        let grid = Grid::from_rows([
            [Some("X"), None, None],
            [None, None, None],
            [None, None, Some("O")],
        ]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(
            json,
            r#"[["X",null,null],[null,null,null],[null,null,"O"]]"#
        );
        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, grid);
    }
}
