//! Per-round feedback barrier.
//!
//! Each automated player owns one barrier. Identifiers accumulate until the
//! threshold (the number of players in the match) is reached, then the whole
//! batch is released at once. This keeps a bot from reacting to part of a
//! round and makes its inference independent of seat order.

use smallvec::SmallVec;

use super::Identifier;

/// A batch of identifiers released by a barrier.
pub type FeedbackBatch = SmallVec<[Identifier; 8]>;

/// Counted-threshold accumulator for one automated player.
#[derive(Clone, Debug)]
pub struct TurnBarrier {
    pending: FeedbackBatch,
    threshold: usize,
}

impl Default for TurnBarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnBarrier {
    /// Barrier that releases after every identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            threshold: 1,
        }
    }

    /// Set the threshold to `max(1, max_players)`.
    pub fn set_threshold(&mut self, max_players: usize) {
        self.threshold = max_players.max(1);
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of identifiers waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue one identifier. Returns the full batch once the threshold is
    /// reached, leaving the barrier empty.
    pub fn push(&mut self, identifier: Identifier) -> Option<FeedbackBatch> {
        self.pending.push(identifier);
        if self.pending.len() >= self.threshold {
            Some(self.drain())
        } else {
            None
        }
    }

    /// Release whatever is pending, ready or not.
    pub fn drain(&mut self) -> FeedbackBatch {
        std::mem::take(&mut self.pending)
    }

    /// Drop pending identifiers. The threshold is kept.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::feedback::Relation;

    fn id(seat: u8, value: i128) -> Identifier {
        Identifier::new(PlayerId::new(seat), Relation::TooLow, value)
    }

    #[test]
    fn test_default_threshold_releases_immediately() {
        let mut barrier = TurnBarrier::new();
        let batch = barrier.push(id(0, 1)).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(barrier.is_empty());
    }

    #[test]
    fn test_threshold_holds_until_full() {
        let mut barrier = TurnBarrier::new();
        barrier.set_threshold(3);

        assert!(barrier.push(id(0, 1)).is_none());
        assert!(barrier.push(id(1, 2)).is_none());
        assert_eq!(barrier.len(), 2);

        let batch = barrier.push(id(2, 3)).unwrap();
        let seats: Vec<_> = batch.iter().map(|i| i.player.0).collect();
        assert_eq!(seats, vec![0, 1, 2]);
        assert!(barrier.is_empty());
    }

    #[test]
    fn test_zero_players_means_one() {
        let mut barrier = TurnBarrier::new();
        barrier.set_threshold(0);
        assert_eq!(barrier.threshold(), 1);
    }

    #[test]
    fn test_clear_keeps_threshold() {
        let mut barrier = TurnBarrier::new();
        barrier.set_threshold(2);
        barrier.push(id(0, 1));
        barrier.clear();

        assert!(barrier.is_empty());
        assert_eq!(barrier.threshold(), 2);
        assert!(barrier.drain().is_empty());
    }
}
