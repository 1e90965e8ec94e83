//! Guess classification.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::{PlayerId, Value};

/// How a guess compares to the mystery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// The guess is above the mystery.
    TooHigh,
    /// The guess is below the mystery.
    TooLow,
    /// The guess is the mystery.
    Exact,
}

impl Relation {
    /// Classify `value` against `mystery`.
    #[must_use]
    pub fn classify(value: Value, mystery: Value) -> Self {
        match value.cmp(&mystery) {
            Ordering::Greater => Relation::TooHigh,
            Ordering::Less => Relation::TooLow,
            Ordering::Equal => Relation::Exact,
        }
    }

    #[must_use]
    pub fn is_exact(self) -> bool {
        self == Relation::Exact
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::TooHigh => write!(f, "Too big"),
            Relation::TooLow => write!(f, "Too small"),
            Relation::Exact => write!(f, "Correct!"),
        }
    }
}

/// One classified guess.
///
/// Immutable once created. Equality and ordering look at `value` only, so
/// sorting a batch puts the tightest bounds at its ends.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Identifier {
    pub player: PlayerId,
    pub relation: Relation,
    pub value: Value,
}

impl Identifier {
    #[must_use]
    pub const fn new(player: PlayerId, relation: Relation, value: Value) -> Self {
        Self {
            player,
            relation,
            value,
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.player, self.value, self.relation)
    }
}

/// Highest `TooLow` value in `ids`: the tightest lower bound they imply.
pub fn tightest_floor<'a>(ids: impl IntoIterator<Item = &'a Identifier>) -> Option<Value> {
    ids.into_iter()
        .filter(|id| id.relation == Relation::TooLow)
        .max()
        .map(|id| id.value)
}

/// Lowest `TooHigh` value in `ids`: the tightest upper bound they imply.
pub fn tightest_ceiling<'a>(ids: impl IntoIterator<Item = &'a Identifier>) -> Option<Value> {
    ids.into_iter()
        .filter(|id| id.relation == Relation::TooHigh)
        .min()
        .map(|id| id.value)
}
