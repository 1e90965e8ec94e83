//! Feedback flowing from the engine back to automated players.
//!
//! - [`Identifier`]: one guess tagged with its [`Relation`] to the mystery
//! - [`TurnBarrier`]: holds identifiers until a full round has been seen

mod barrier;
mod identifier;

pub use barrier::{FeedbackBatch, TurnBarrier};
pub use identifier::{tightest_ceiling, tightest_floor, Identifier, Relation};
