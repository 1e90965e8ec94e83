//! # mystery-guess
//!
//! A guess-the-mystery-number match engine for any mix of human and
//! automated players.
//!
//! ## Design Principles
//!
//! 1. **Player-Agnostic**: The engine only sees the [`Player`] capability.
//!    Console prompts, remote peers and in-process bots look the same.
//!
//! 2. **Round Barrier**: Automated players fold feedback in only after a
//!    full round, so their inference does not depend on seat order.
//!
//! 3. **Explicit Ownership**: A match is a [`MatchEngine`] value owned by
//!    the caller. There are no global per-mode instances.
//!
//! ## Modules
//!
//! - `core`: Values, seats, RNG, levels, configuration, errors
//! - `feedback`: Identifiers and the per-round barrier
//! - `players`: Player trait, interval tracker, automated and human players
//! - `game`: Match engine, reports and game modes
//! - `config`: Named configuration bags with path lookup
//! - `store`: User and match-history store

pub mod config;
pub mod core;
pub mod feedback;
pub mod game;
pub mod players;
pub mod store;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, GameRng, Level, LevelTable, PlayerId, Value};

pub use crate::feedback::{FeedbackBatch, Identifier, Relation, TurnBarrier};

pub use crate::players::{
    AutomatedPlayer, HumanPlayer, InputEvent, InputSource, IntervalTracker, Player, PlayerKind,
};

pub use crate::game::{
    single_player, zero_player, LogObserver, MatchBuilder, MatchEnd, MatchEngine, MatchObserver,
    MatchState, MatchSummary, RoundReport, Termination,
};

pub use crate::config::{ConfigError, ConfigStore};

pub use crate::store::{GameDb, HistoryRecord, MatchId, User, UserId};
