//! Tic-tac-toe rounds and multi-round games.

mod action;
mod computer;
mod error;
mod game;
mod grid;
mod location;
mod round;
pub mod rules;
mod types;

pub use action::{MoveRequest, RoundReport};
pub use computer::ComputerPlayer;
pub use error::{GameError, GridError};
pub use game::{Game, GameRecord, Scoreboard, finalize_game, game_winner, is_game_over};
pub use grid::Grid;
pub use location::{GRID_SIZE, Location};
pub use round::{Round, is_round_over, round_winner};
pub use types::{Outcome, Side, Square, Token, Tokens};
