//! In-process guesser driven by interval inference.

use im::Vector;
use log::{debug, trace, warn};
use rustc_hash::FxHashSet;

use super::{IntervalTracker, Player, PlayerKind};
use crate::core::{GameError, GameRng, Level, PlayerId, Value};
use crate::feedback::{Identifier, TurnBarrier};

/// Intervals at most this wide are sampled by listing their unexplored
/// values; wider ones use rejection sampling.
const ENUMERATION_LIMIT: u128 = 4096;

/// Automated player.
///
/// Feedback is held in a [`TurnBarrier`] until a full round has arrived,
/// then folded into the [`IntervalTracker`] in one step. Guesses are drawn
/// uniformly from the values of the interval this player has not tried yet.
#[derive(Clone, Debug)]
pub struct AutomatedPlayer {
    name: String,
    tracker: IntervalTracker,
    barrier: TurnBarrier,
    explored: FxHashSet<Value>,
    history: Vector<Option<Value>>,
    rng: GameRng,
}

impl AutomatedPlayer {
    /// Create a bot searching `level` with its own random stream.
    pub fn new(name: impl Into<String>, level: Level, rng: GameRng) -> Self {
        Self {
            name: name.into(),
            tracker: IntervalTracker::new(level),
            barrier: TurnBarrier::new(),
            explored: FxHashSet::default(),
            history: Vector::new(),
            rng,
        }
    }

    /// Create a bot whose stream is seeded directly.
    pub fn with_seed(name: impl Into<String>, level: Level, seed: u64) -> Self {
        Self::new(name, level, GameRng::new(seed))
    }

    #[must_use]
    pub fn tracker(&self) -> &IntervalTracker {
        &self.tracker
    }

    #[must_use]
    pub fn barrier(&self) -> &TurnBarrier {
        &self.barrier
    }

    /// Values tried since the last reset.
    #[must_use]
    pub fn explored(&self) -> &FxHashSet<Value> {
        &self.explored
    }

    /// Overwrite the search interval.
    pub fn put(&mut self, min: Value, max: Value) {
        self.tracker.put(min, max);
    }

    /// Fold whatever feedback is pending, even if the round is incomplete.
    pub fn flush(&mut self) -> Result<(), GameError> {
        let batch = self.barrier.drain();
        if batch.is_empty() {
            return Ok(());
        }
        self.tracker.consolidate(&batch)
    }

    /// Start the search over from the level range. Pending feedback and
    /// the guess history are kept.
    fn restart(&mut self) {
        self.tracker.reset();
        self.explored.clear();
    }

    fn sample(&mut self) -> Value {
        self.tracker.swap_if_inverted();
        let (min, max) = (self.tracker.min(), self.tracker.max());
        let width = self.tracker.width();

        let explored_inside = self
            .explored
            .iter()
            .filter(|v| (min..=max).contains(*v))
            .count() as u128;

        if explored_inside >= width {
            warn!(
                "{}: interval [{}, {}] exhausted, restarting from level range",
                self.name, min, max
            );
            self.restart();
            let (low, high) = self.tracker.baseline();
            return self.rng.gen_inclusive(low, high);
        }

        if width <= ENUMERATION_LIMIT.max(explored_inside * 2) {
            let candidates: Vec<Value> = (min..=max).filter(|v| !self.explored.contains(v)).collect();
            let index = self.rng.gen_index(candidates.len());
            candidates[index]
        } else {
            loop {
                let value = self.rng.gen_inclusive(min, max);
                if !self.explored.contains(&value) {
                    break value;
                }
            }
        }
    }
}

impl Player for AutomatedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Automated
    }

    fn seat(&mut self, id: PlayerId) {
        self.tracker.set_owner(id);
    }

    fn get(&mut self) -> Result<Value, GameError> {
        let value = if self.tracker.is_degenerate() {
            self.tracker.min()
        } else {
            self.sample()
        };

        trace!("{} guesses {}", self.name, value);
        self.explored.insert(value);
        self.history.push_back(Some(value));
        Ok(value)
    }

    fn set_level(&mut self, level: Level) {
        self.tracker.rebase(level);
        self.explored.clear();
    }

    fn tell(&mut self, max_players: usize) {
        self.barrier.set_threshold(max_players);
    }

    fn push_feedback(&mut self, identifier: Identifier) -> Result<(), GameError> {
        match self.barrier.push(identifier) {
            Some(batch) => {
                debug!("{} consolidating a round of {}", self.name, batch.len());
                self.tracker.consolidate(&batch)
            }
            None => Ok(()),
        }
    }

    fn reset(&mut self) {
        self.barrier.clear();
        self.tracker.reset();
        self.explored.clear();
        self.history.clear();
    }

    fn history(&self) -> Vector<Option<Value>> {
        self.history.clone()
    }

    fn interval(&self) -> Option<(Value, Value)> {
        Some((self.tracker.min(), self.tracker.max()))
    }
}
