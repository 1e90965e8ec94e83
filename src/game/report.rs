//! Round reports, match summaries and observers.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{Level, PlayerId, Value};
use crate::feedback::Relation;

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchEnd {
    /// At least one player hit the mystery.
    Won,
    /// `max_rounds` elapsed without a winner.
    RoundLimit,
    /// A player aborted mid-round.
    Interrupted,
}

/// One guess as shown in a round report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub seat: PlayerId,
    pub name: String,
    pub value: Value,
    pub relation: Relation,
}

impl std::fmt::Display for RoundEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.value, self.relation)
    }
}

/// Every guess of one completed round, in seat order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub turn: u32,
    pub entries: Vec<RoundEntry>,
}

/// Outcome of a match, captured before the engine resets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub level: Level,
    pub mystery: Value,
    pub turns: u32,
    pub winners: Vec<PlayerId>,
    pub winner_names: Vec<String>,
    pub end: MatchEnd,
}

impl MatchSummary {
    #[must_use]
    pub fn has_winner(&self) -> bool {
        !self.winners.is_empty()
    }

    #[must_use]
    pub fn is_winner(&self, seat: PlayerId) -> bool {
        self.winners.contains(&seat)
    }
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game ends in {} turn(s) with {} winning player(s)!",
            self.turns,
            self.winners.len()
        )
    }
}

/// Hooks called by the engine as a match progresses.
pub trait MatchObserver: Send {
    fn on_start(&mut self, _level: &Level, _player_count: usize) {}

    /// Called after every completed round. A round cut short by an
    /// interrupt is not reported.
    fn on_round(&mut self, _report: &RoundReport) {}

    fn on_end(&mut self, _summary: &MatchSummary) {}
}

/// Observer that writes the match to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl MatchObserver for LogObserver {
    fn on_start(&mut self, level: &Level, player_count: usize) {
        info!("{} with {} player(s)", level, player_count);
    }

    fn on_round(&mut self, report: &RoundReport) {
        debug!("Turn {}", report.turn);
        for entry in &report.entries {
            debug!("  {}", entry);
        }
    }

    fn on_end(&mut self, summary: &MatchSummary) {
        info!("{}", summary);
    }
}
