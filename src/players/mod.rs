//! Player capability and its implementations.
//!
//! The engine talks to every guesser through the [`Player`] trait and never
//! needs to know whether it is a console prompt, a remote peer or an
//! in-process strategy.
//!
//! - [`AutomatedPlayer`]: narrows an [`IntervalTracker`] from batched feedback
//! - [`HumanPlayer`]: reads guesses from an [`InputSource`]

mod automated;
mod human;
mod tracker;

pub use automated::AutomatedPlayer;
pub use human::{ConsoleInput, HumanPlayer, InputEvent, InputSource, ScriptedInput, MALFORMED_GUESS};
pub use tracker::IntervalTracker;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, Level, PlayerId, Value};
use crate::feedback::Identifier;

/// Which family a player belongs to. Only automated players receive
/// feedback broadcasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Automated,
}

/// Anything that can produce a guess and receive feedback.
pub trait Player: Send {
    /// Display name.
    fn name(&self) -> &str;

    fn kind(&self) -> PlayerKind;

    /// Called once when the engine registers this player.
    fn seat(&mut self, _id: PlayerId) {}

    /// Produce the next guess.
    ///
    /// Returns [`GameError::Interrupted`] if the guesser aborts; the engine
    /// then stops the match without finishing the round.
    fn get(&mut self) -> Result<Value, GameError>;

    /// Level changed while no match is running.
    fn set_level(&mut self, _level: Level) {}

    /// Number of players in the match, sent once before the first round.
    fn tell(&mut self, _max_players: usize) {}

    /// Receive one classified guess from the current round.
    fn push_feedback(&mut self, _identifier: Identifier) -> Result<(), GameError> {
        Ok(())
    }

    /// Forget everything learned during the last match.
    fn reset(&mut self);

    /// Guesses produced since the last reset. `None` marks malformed input.
    fn history(&self) -> Vector<Option<Value>>;

    /// Current search interval as `(min, max)`, for players that keep one.
    fn interval(&self) -> Option<(Value, Value)> {
        None
    }
}
