//! Play session: the state-change feedback loop.
//!
//! Each mutation applied to the store is a state change. After every one
//! the session asks the orchestrator for the next command, one evaluation at
//! a time, until the human is due to move or the game has been archived.

use crate::capabilities::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use crate::config::{ConfigError, GameConfig};
use crate::games::tictactoe::{Game, GameError, GameRecord, Location, MoveRequest};
use crate::orchestrator::{Command, Orchestrator, Phase, phase_of};
use crate::ports::{GameReporter, GameSource, MoveRegistrar};
use crate::store::{InMemoryStore, StoreError};
use derive_more::{Display, Error, From};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// Where a session stands after settling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No game has been started.
    NoGame,
    /// The human is due to move.
    AwaitingHuman,
    /// The game finished and was archived.
    Finished(GameRecord),
}

/// Error raised while driving a session.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The state machine rejected a query.
    #[display("{_0}")]
    Game(GameError),
    /// The data service rejected a command.
    #[display("{_0}")]
    Store(StoreError),
    /// The game could not be created.
    #[display("{_0}")]
    Config(ConfigError),
}

/// A single game driven against the in-memory data service.
#[derive(Debug)]
pub struct PlaySession<R = StdRng, I = RandomIdGenerator, C = SystemClock> {
    orchestrator: Orchestrator<R, I, C>,
    store: InMemoryStore,
}

impl PlaySession {
    /// Creates a session from configuration and starts its game.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Result<Self, SessionError> {
        let mut session = Self::new(Orchestrator::new(*config.seed()), InMemoryStore::new());
        session.start(config)?;
        Ok(session)
    }
}

impl<R: Rng, I: IdGenerator, C: Clock> PlaySession<R, I, C> {
    /// Wires an orchestrator to a store.
    pub fn new(orchestrator: Orchestrator<R, I, C>, store: InMemoryStore) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    /// Starts a new game from `config`, stamped with the orchestrator's clock.
    #[instrument(skip_all)]
    pub fn start(&mut self, config: &GameConfig) -> Result<(), SessionError> {
        let game = Game::from_config(config)?.with_started_at(self.orchestrator.clock().now());
        self.store.start_game(game);
        Ok(())
    }

    /// Borrows the data service.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Borrows the game being played.
    pub fn game(&self) -> Option<&Game> {
        self.store.current_game()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        phase_of(self.store.current_game())
    }

    /// Evaluates and applies commands until there is nothing left to do.
    #[instrument(skip(self))]
    pub fn settle(&mut self) -> Result<SessionStatus, SessionError> {
        loop {
            let game = self.store.fetch_current_game();
            let Some(command) = self.orchestrator.evaluate(game.as_ref())? else {
                return Ok(match game {
                    Some(_) => SessionStatus::AwaitingHuman,
                    None => SessionStatus::NoGame,
                });
            };

            match command {
                Command::RegisterMove(request) => {
                    debug!(%request, "Applying computer move");
                    self.store.register_move(request)?;
                }
                Command::ReportRound(report) => {
                    self.store.round_over(report)?;
                }
                Command::ReportGame { record, id } => {
                    self.store.game_over(record.clone(), id)?;
                    info!(winner = %record.winner(), "Session finished");
                    return Ok(SessionStatus::Finished(record));
                }
            }
        }
    }

    /// Registers the human's move at `location`, then settles.
    #[instrument(skip(self))]
    pub fn human_move(&mut self, location: Location) -> Result<SessionStatus, SessionError> {
        let token = self
            .store
            .current_game()
            .ok_or(StoreError::NoGame)?
            .tokens()
            .human()
            .clone();
        self.store.register_move(MoveRequest::new(token, location))?;
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{FixedClock, SequentialIds};
    use crate::games::tictactoe::{ComputerPlayer, Side};
    use chrono::{TimeZone, Utc};

    fn session(config: &GameConfig) -> PlaySession<StdRng, SequentialIds, FixedClock> {
        let orchestrator = Orchestrator::with_capabilities(
            ComputerPlayer::seeded(17),
            SequentialIds::new("game"),
            FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()),
        );
        let mut session = PlaySession::new(orchestrator, InMemoryStore::new());
        session.start(config).unwrap();
        session
    }

    #[test]
    fn test_no_game_settles_to_noop() {
        let orchestrator = Orchestrator::new(Some(1));
        let mut session = PlaySession::new(orchestrator, InMemoryStore::new());
        assert_eq!(session.settle(), Ok(SessionStatus::NoGame));
        assert_eq!(session.phase(), Phase::Waiting);
    }

    #[test]
    fn test_human_first_waits() {
        let mut session = session(&GameConfig::default());
        assert_eq!(session.settle(), Ok(SessionStatus::AwaitingHuman));
        assert_eq!(session.game().unwrap().current_squares().filled_count(), 0);
    }

    #[test]
    fn test_computer_first_moves_then_waits() {
        let config = GameConfig::default().with_first_player(Side::Computer);
        let mut session = session(&config);
        assert_eq!(session.settle(), Ok(SessionStatus::AwaitingHuman));
        let game = session.game().unwrap();
        assert_eq!(game.current_squares().filled_count(), 1);
        assert_eq!(game.next_player(), &Side::Human);
    }

    #[test]
    fn test_human_move_gets_reply() {
        let mut session = session(&GameConfig::default());
        session.settle().unwrap();
        let status = session.human_move(Location::new(1, 1).unwrap()).unwrap();
        assert_eq!(status, SessionStatus::AwaitingHuman);
        assert_eq!(session.game().unwrap().current_squares().filled_count(), 2);
    }

    #[test]
    fn test_occupied_square_surfaces_store_error() {
        let mut session = session(&GameConfig::default());
        session.settle().unwrap();
        session.human_move(Location::new(1, 1).unwrap()).unwrap();
        let err = session.human_move(Location::new(1, 1).unwrap()).unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Grid(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::default().with_num_rounds(0);
        let orchestrator = Orchestrator::new(Some(1));
        let mut session = PlaySession::new(orchestrator, InMemoryStore::new());
        assert!(matches!(session.start(&config), Err(SessionError::Config(_))));
    }
}
