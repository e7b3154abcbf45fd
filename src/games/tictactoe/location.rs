//! Grid coordinates.

use super::GridError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the grid.
pub const GRID_SIZE: usize = 3;

/// A cell on the 3x3 grid, addressed by row and column.
///
/// Serialized as a `[row, col]` pair, the shape the data service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct Location {
    row: usize,
    col: usize,
}

impl Location {
    /// All nine locations in row-major order.
    pub const ALL: [Location; 9] = [
        Location::at(0, 0),
        Location::at(0, 1),
        Location::at(0, 2),
        Location::at(1, 0),
        Location::at(1, 1),
        Location::at(1, 2),
        Location::at(2, 0),
        Location::at(2, 1),
        Location::at(2, 2),
    ];

    /// Creates a location, rejecting coordinates outside the grid.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, GridError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row (0 is the top).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column (0 is the left).
    pub fn col(&self) -> usize {
        self.col
    }

    /// Converts to a row-major index (0-8).
    pub fn to_index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    /// Creates a location from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses terminal input.
    ///
    /// Accepts `"row col"` or `"row,col"` (zero-based), or a single square
    /// number 1-9 as shown on an empty grid.
    #[instrument]
    pub fn parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        match parts.as_slice() {
            [number] => {
                let number: usize = number.parse().ok()?;
                Self::from_index(number.checked_sub(1)?)
            }
            [row, col] => Self::new(row.parse().ok()?, col.parse().ok()?).ok(),
            _ => None,
        }
    }
}

impl TryFrom<[usize; 2]> for Location {
    type Error = GridError;

    fn try_from([row, col]: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl From<Location> for [usize; 2] {
    fn from(location: Location) -> Self {
        [location.row, location.col]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
