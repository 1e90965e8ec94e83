//! Search interval of one automated player.
//!
//! ## Bounds
//!
//! `narrow` only ever moves `min` up and `max` down, but it does not force
//! `min <= max`. Inconsistent feedback can leave the bounds crossed; the
//! owning player swaps them back before it samples (see
//! [`IntervalTracker::swap_if_inverted`]).
//!
//! ## Own history
//!
//! Identifiers describing the owner's own guesses are kept and re-applied on
//! every consolidation, so an interval widened by [`IntervalTracker::put`]
//! is pulled back in by what the owner already knows.

use log::debug;

use crate::core::{GameError, Level, PlayerId, Value};
use crate::feedback::{tightest_ceiling, tightest_floor, Identifier};

#[derive(Clone, Debug)]
pub struct IntervalTracker {
    min: Value,
    max: Value,
    level_min: Value,
    level_max: Value,
    owner: Option<PlayerId>,
    own_history: Vec<Identifier>,
}

impl IntervalTracker {
    /// Tracker spanning a level's full range.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self::from_bounds(level.lower(), level.upper())
    }

    /// Tracker spanning `[min, max]`, which also becomes the reset baseline.
    #[must_use]
    pub fn from_bounds(min: Value, max: Value) -> Self {
        Self {
            min,
            max,
            level_min: min,
            level_max: max,
            owner: None,
            own_history: Vec::new(),
        }
    }

    /// Seat whose guesses count as "own" history.
    pub fn set_owner(&mut self, owner: PlayerId) {
        self.owner = Some(owner);
    }

    #[must_use]
    pub fn min(&self) -> Value {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Value {
        self.max
    }

    /// Reset baseline as `(min, max)`.
    #[must_use]
    pub fn baseline(&self) -> (Value, Value) {
        (self.level_min, self.level_max)
    }

    #[must_use]
    pub fn own_history(&self) -> &[Identifier] {
        &self.own_history
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Number of integers in the interval, whichever way round it is.
    #[must_use]
    pub fn width(&self) -> u128 {
        self.min.abs_diff(self.max) + 1
    }

    /// Swap crossed bounds. Returns whether a swap happened.
    pub fn swap_if_inverted(&mut self) -> bool {
        if self.is_inverted() {
            std::mem::swap(&mut self.min, &mut self.max);
            true
        } else {
            false
        }
    }

    /// Overwrite the current interval. The baseline is unchanged.
    pub fn put(&mut self, min: Value, max: Value) {
        self.min = min;
        self.max = max;
    }

    /// Fold identifiers into the interval. Empty input is a no-op.
    pub fn narrow(&mut self, identifiers: &[Identifier]) {
        if identifiers.is_empty() {
            return;
        }

        if let Some(owner) = self.owner {
            self.own_history
                .extend(identifiers.iter().filter(|id| id.player == owner).copied());
        }

        self.tighten(tightest_floor(identifiers), tightest_ceiling(identifiers));
        let (floor, ceiling) = (tightest_floor(&self.own_history), tightest_ceiling(&self.own_history));
        self.tighten(floor, ceiling);
    }

    /// Narrow on a batch released by a barrier. An empty batch means the
    /// barrier threshold was miscounted.
    pub fn consolidate(&mut self, batch: &[Identifier]) -> Result<(), GameError> {
        if batch.is_empty() {
            return Err(GameError::InvalidArgument(
                "consolidation triggered with no identifiers".to_string(),
            ));
        }

        let before = (self.min, self.max);
        self.narrow(batch);
        debug!(
            "consolidated {} identifier(s): [{}, {}] -> [{}, {}]",
            batch.len(),
            before.0,
            before.1,
            self.min,
            self.max
        );
        Ok(())
    }

    /// Move the baseline to `level` and restart from it. The owner is kept.
    pub fn rebase(&mut self, level: Level) {
        self.level_min = level.lower();
        self.level_max = level.upper();
        self.reset();
    }

    /// Restore the baseline and forget own history.
    pub fn reset(&mut self) {
        self.min = self.level_min;
        self.max = self.level_max;
        self.own_history.clear();
    }

    fn tighten(&mut self, floor: Option<Value>, ceiling: Option<Value>) {
        if let Some(floor) = floor {
            self.min = self.min.max(floor);
        }
        if let Some(ceiling) = ceiling {
            self.max = self.max.min(ceiling);
        }
    }
}
