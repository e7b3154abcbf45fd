//! Impossible TTT library - round and game lifecycle for human-versus-computer tic-tac-toe
//!
//! The core is a small state machine over a 3x3 grid. It reads a game owned
//! by a data service and answers with the mutation that should happen next.
//!
//! # Architecture
//!
//! - **Games**: grid, win/draw rules, round engine, random computer player,
//!   multi-round aggregation
//! - **Orchestrator**: derives the lifecycle phase and proposes commands
//! - **Ports**: collaborator traits for fetching, moving, and reporting
//! - **Store**: in-memory data service implementing the ports
//! - **Session**: the synchronous state-change feedback loop
//!
//! # Example
//!
//! ```no_run
//! use impossible_ttt::{GameConfig, Location, PlaySession, SessionStatus};
//!
//! # fn example() -> Result<(), impossible_ttt::SessionError> {
//! let mut session = PlaySession::from_config(&GameConfig::default())?;
//! let mut status = session.settle()?;
//! while status == SessionStatus::AwaitingHuman {
//!     let location = session.game().and_then(|g| g.current_squares().unmarked().first().copied());
//!     match location {
//!         Some(location) => status = session.human_move(location)?,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod capabilities;
mod config;
mod games;
mod orchestrator;
mod ports;
mod session;
mod store;

// Crate-level exports - Capabilities
pub use capabilities::{Clock, FixedClock, IdGenerator, RandomIdGenerator, SequentialIds, SystemClock};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    ComputerPlayer, GRID_SIZE, Game, GameError, GameRecord, Grid, GridError, Location,
    MoveRequest, Outcome, Round, RoundReport, Scoreboard, Side, Square, Token, Tokens,
    finalize_game, game_winner, is_game_over, is_round_over, round_winner,
};

// Crate-level exports - Rules
pub use games::tictactoe::rules::{Line, WINNING_LINES, WinningLine, find_winner, find_winning_line, is_full};

// Crate-level exports - State machine driver
pub use orchestrator::{Command, Orchestrator, Phase, phase_of};

// Crate-level exports - Collaborators
pub use ports::{GameReporter, GameSource, MoveRegistrar};
pub use store::{InMemoryStore, StoreError};

// Crate-level exports - Session management
pub use session::{PlaySession, SessionError, SessionStatus};
