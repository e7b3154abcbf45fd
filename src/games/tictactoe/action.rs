//! Mutation requests sent to the data service.
//!
//! The state machine never edits the game it is shown. It describes the
//! change it wants and the collaborator applies it.

use super::{Grid, Location, Outcome, Token};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Request to place `token` at `location`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// The token to place.
    pub token: Token,
    /// The target square.
    pub location: Location,
}

impl MoveRequest {
    /// Creates a new move request.
    #[instrument]
    pub fn new(token: Token, location: Location) -> Self {
        Self { token, location }
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.token, self.location)
    }
}

/// Result of a finished round, reported for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RoundReport {
    /// Who won the round.
    pub winner: Outcome,
    /// The grid as it stood when the round ended.
    pub board: Grid,
}
