//! State-machine driver for a game.
//!
//! The [`Orchestrator`] is handed the collaborator's current [`Game`] after
//! every state change and answers with at most one [`Command`]. Phases are
//! re-derived from the game each time; nothing is cached between calls.

use crate::capabilities::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use crate::games::tictactoe::{
    ComputerPlayer, Game, GameError, GameRecord, MoveRequest, RoundReport, Side, finalize_game,
    is_game_over, is_round_over, round_winner,
};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Lifecycle phase derived from a game snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// No game has been delivered yet.
    Waiting,
    /// A round is being played.
    InRound,
    /// The grid shows a finished round that has not been recorded.
    RoundJustEnded,
    /// All rounds are recorded.
    GameJustEnded,
}

/// Derives the phase of `game`.
///
/// Game-over is checked before round-over so a finished game never asks for
/// another round report or computer move.
#[instrument(skip(game))]
pub fn phase_of(game: Option<&Game>) -> Phase {
    match game {
        None => Phase::Waiting,
        Some(game) if is_game_over(game) => Phase::GameJustEnded,
        Some(game) if is_round_over(game.current_squares()) => Phase::RoundJustEnded,
        Some(_) => Phase::InRound,
    }
}

/// A mutation the collaborator is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a token on the grid.
    RegisterMove(MoveRequest),
    /// Record a finished round and reset the grid.
    ReportRound(RoundReport),
    /// Record the finished game.
    ReportGame {
        /// The terminal record.
        record: GameRecord,
        /// Identifier of the record.
        id: String,
    },
}

/// Evaluates game snapshots and proposes the next mutation.
#[derive(Debug)]
pub struct Orchestrator<R = StdRng, I = RandomIdGenerator, C = SystemClock> {
    computer: ComputerPlayer<R>,
    ids: I,
    clock: C,
}

impl Orchestrator {
    /// Creates an orchestrator using system time and random ids.
    ///
    /// With a seed the computer's moves are reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let computer = match seed {
            Some(seed) => ComputerPlayer::seeded(seed),
            None => ComputerPlayer::from_entropy(),
        };
        Self::with_capabilities(computer, RandomIdGenerator, SystemClock)
    }
}

impl<R: Rng, I: IdGenerator, C: Clock> Orchestrator<R, I, C> {
    /// Creates an orchestrator from explicit capabilities.
    pub fn with_capabilities(computer: ComputerPlayer<R>, ids: I, clock: C) -> Self {
        Self {
            computer,
            ids,
            clock,
        }
    }

    /// Returns the clock used for completion timestamps.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Decides what should happen next for `game`.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no game has been
    /// delivered yet, or the human is due to move.
    #[instrument(skip_all)]
    pub fn evaluate(&mut self, game: Option<&Game>) -> Result<Option<Command>, GameError> {
        let phase = phase_of(game);
        debug!(%phase, "Evaluating game");

        let Some(game) = game else {
            return Ok(None);
        };

        match phase {
            Phase::Waiting => Ok(None),
            Phase::GameJustEnded => {
                let record = finalize_game(game, &mut self.ids, &self.clock)?;
                let id = record.id().clone();
                info!(%id, winner = %record.winner(), "Reporting game outcome");
                Ok(Some(Command::ReportGame { record, id }))
            }
            Phase::RoundJustEnded => {
                let board = game.current_squares();
                let winner = round_winner(board, game.tokens())?;
                info!(%winner, round = game.rounds().len() + 1, "Reporting round outcome");
                Ok(Some(Command::ReportRound(RoundReport::new(
                    winner,
                    board.clone(),
                ))))
            }
            Phase::InRound => match game.next_player() {
                Side::Computer => {
                    let location = self.computer.choose_move(game.current_squares())?;
                    let token = game.next_token().clone();
                    Ok(Some(Command::RegisterMove(MoveRequest::new(token, location))))
                }
                Side::Human => {
                    debug!("Awaiting human move");
                    Ok(None)
                }
            },
        }
    }
}
