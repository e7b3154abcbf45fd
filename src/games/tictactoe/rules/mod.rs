//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Grid`](super::Grid). Rules are kept apart from
//! grid storage so the round engine can compose them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Line, WINNING_LINES, WinningLine, find_winner, find_winning_line};
