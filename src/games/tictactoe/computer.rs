//! Computer opponent: uniform-random choice among unmarked squares.

use super::{GameError, Grid, Location};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Computer player with an injectable random source.
#[derive(Debug, Clone)]
pub struct ComputerPlayer<R = StdRng> {
    rng: R,
}

impl ComputerPlayer<StdRng> {
    /// Creates a player whose choices are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a player seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> ComputerPlayer<R> {
    /// Wraps an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks an unmarked square uniformly at random.
    ///
    /// Candidates are enumerated in row-major order before sampling.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLegalMove`] if the grid is full.
    #[instrument(skip_all)]
    pub fn choose_move(&mut self, grid: &Grid) -> Result<Location, GameError> {
        let unmarked = grid.unmarked();
        if unmarked.is_empty() {
            return Err(GameError::NoLegalMove);
        }
        let choice = unmarked[self.rng.random_range(0..unmarked.len())];
        debug!(%choice, candidates = unmarked.len(), "Computer chose square");
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Token;
    use std::collections::HashSet;

    #[test]
    fn test_empty_grid_any_square() {
        let mut player = ComputerPlayer::seeded(7);
        let choice = player.choose_move(&Grid::new()).unwrap();
        assert!(Location::ALL.contains(&choice));
    }

    #[test]
    fn test_single_unmarked_square_always_chosen() {
        let grid = Grid::from_rows([
            [Some("X"), Some("O"), Some("X")],
            [Some("X"), None, Some("O")],
            [Some("O"), Some("X"), Some("O")],
        ]);
        for seed in 0..20 {
            let mut player = ComputerPlayer::seeded(seed);
            assert_eq!(player.choose_move(&grid), Ok(Location::new(1, 1).unwrap()));
        }
    }

    #[test]
    fn test_full_grid_has_no_move() {
        let mut grid = Grid::new();
        for location in Location::ALL {
            grid.mark(location, Token::from("X")).unwrap();
        }
        let mut player = ComputerPlayer::seeded(1);
        assert_eq!(player.choose_move(&grid), Err(GameError::NoLegalMove));
    }

    #[test]
    fn test_never_picks_occupied_square() {
        let grid = Grid::from_rows([
            [Some("X"), None, Some("O")],
            [None, Some("X"), None],
            [Some("O"), None, None],
        ]);
        let unmarked = grid.unmarked();
        let mut player = ComputerPlayer::seeded(42);
        for _ in 0..100 {
            let choice = player.choose_move(&grid).unwrap();
            assert!(unmarked.contains(&choice));
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let grid = Grid::new();
        let mut a = ComputerPlayer::seeded(99);
        let mut b = ComputerPlayer::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&grid), b.choose_move(&grid));
        }
    }

    #[test]
    fn test_covers_every_square() {
        let grid = Grid::new();
        let mut player = ComputerPlayer::seeded(3);
        let seen: HashSet<Location> = (0..500)
            .map(|_| player.choose_move(&grid).unwrap())
            .collect();
        assert_eq!(seen.len(), 9);
    }
}
