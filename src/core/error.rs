//! Crate error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::{MatchId, UserId};

/// Errors surfaced by the engine, players and collaborators.
#[derive(Debug, Error)]
pub enum GameError {
    /// An operation was called outside the state that allows it,
    /// e.g. scanning a guess before the mystery is drawn.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A logic error in the caller's bookkeeping, e.g. a consolidation
    /// triggered with an empty feedback batch.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The guesser aborted while producing a guess.
    #[error("player interrupted the match")]
    Interrupted,

    /// Level outside the precomputed table.
    #[error("unknown level {0}")]
    UnknownLevel(u8),

    #[error("no such user: {0}")]
    UserNotFound(UserId),

    #[error("no such history id: {0}")]
    HistoryNotFound(MatchId),

    #[error("history id {0} already recorded")]
    DuplicateHistory(MatchId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}
