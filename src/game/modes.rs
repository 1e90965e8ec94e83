//! Match builders for the standard game modes.
//!
//! - **Single player**: one or more humans against automated players
//! - **Zero player**: automated players only, useful for watching the
//!   inference converge
//!
//! Every bot's random stream is derived from the match seed and the bot's
//! name, so a match replays exactly when the seed and seating are the same.

use super::engine::MatchEngine;
use super::report::{LogObserver, MatchObserver};
use crate::core::{GameConfig, GameError, GameRng};
use crate::players::{AutomatedPlayer, Player};

enum Seat {
    Ready(Box<dyn Player>),
    Bot(String),
}

/// Builder for a configured [`MatchEngine`].
pub struct MatchBuilder {
    config: GameConfig,
    seats: Vec<Seat>,
    observers: Vec<Box<dyn MatchObserver>>,
    log_rounds: bool,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl MatchBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            seats: Vec::new(),
            observers: Vec::new(),
            log_rounds: true,
        }
    }

    /// Seat an existing player.
    #[must_use]
    pub fn player(mut self, player: impl Player + 'static) -> Self {
        self.seats.push(Seat::Ready(Box::new(player)));
        self
    }

    /// Seat one automated player.
    #[must_use]
    pub fn bot(mut self, name: impl Into<String>) -> Self {
        self.seats.push(Seat::Bot(name.into()));
        self
    }

    /// Seat `count` automated players named `Bot-<n>`, numbered after any
    /// bots already seated.
    #[must_use]
    pub fn bots(mut self, count: usize) -> Self {
        let first = self.seats.iter().filter(|s| matches!(s, Seat::Bot(_))).count();
        for n in first..first + count {
            self.seats.push(Seat::Bot(format!("Bot-{n}")));
        }
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Skip the default [`LogObserver`].
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.log_rounds = false;
        self
    }

    pub fn build(self) -> Result<MatchEngine, GameError> {
        let mut engine = MatchEngine::new(self.config)?;
        let level = engine.level();
        let streams = GameRng::new(engine.config().seed);

        for seat in self.seats {
            let player: Box<dyn Player> = match seat {
                Seat::Ready(player) => player,
                Seat::Bot(name) => {
                    let rng = streams.for_context(&name);
                    Box::new(AutomatedPlayer::new(name, level, rng))
                }
            };
            if engine.register_boxed(player).is_none() {
                return Err(GameError::InvalidArgument("too many players for one match".to_string()));
            }
        }

        if self.log_rounds {
            engine.add_observer(Box::new(LogObserver));
        }
        for observer in self.observers {
            engine.add_observer(observer);
        }
        Ok(engine)
    }
}

/// Humans first, then `bots` automated players.
pub fn single_player(
    config: GameConfig,
    humans: impl IntoIterator<Item = Box<dyn Player>>,
    bots: usize,
) -> Result<MatchEngine, GameError> {
    let mut builder = MatchBuilder::new(config);
    for human in humans {
        builder.seats.push(Seat::Ready(human));
    }
    builder.bots(bots).build()
}

/// Automated players only. At least one bot is always seated.
pub fn zero_player(config: GameConfig, bots: usize) -> Result<MatchEngine, GameError> {
    MatchBuilder::new(config).bots(bots.max(1)).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::players::{HumanPlayer, PlayerKind, ScriptedInput};

    #[test]
    fn test_zero_player_seats_bots() {
        let engine = zero_player(GameConfig::default(), 3).unwrap();
        assert_eq!(engine.player_count(), 3);
        assert_eq!(engine.player_name(PlayerId::new(0)), "Bot-0");
        assert_eq!(engine.player_name(PlayerId::new(2)), "Bot-2");
    }

    #[test]
    fn test_zero_player_minimum_one_bot() {
        let engine = zero_player(GameConfig::default(), 0).unwrap();
        assert_eq!(engine.player_count(), 1);
    }

    #[test]
    fn test_single_player_order() {
        let human: Box<dyn Player> = Box::new(HumanPlayer::new("Bill", ScriptedInput::default()));
        let engine = single_player(GameConfig::default(), [human], 2).unwrap();

        assert_eq!(engine.player_count(), 3);
        let first = engine.player(PlayerId::new(0)).unwrap();
        assert_eq!(first.name(), "Bill");
        assert_eq!(first.kind(), PlayerKind::Human);
        assert_eq!(engine.player_name(PlayerId::new(1)), "Bot-0");
    }

    #[test]
    fn test_builder_numbering_continues() {
        let engine = MatchBuilder::default()
            .bots(1)
            .bot("Custom")
            .bots(1)
            .quiet()
            .build()
            .unwrap();

        let names: Vec<_> = PlayerId::all(engine.player_count())
            .map(|s| engine.player_name(s).to_string())
            .collect();
        assert_eq!(names, vec!["Bot-0", "Custom", "Bot-2"]);
    }

    #[test]
    fn test_same_seed_replays() {
        let config = GameConfig::default().with_level(3).with_seed(9);
        let a = zero_player(config.clone(), 2).unwrap().start().unwrap();
        let b = zero_player(config, 2).unwrap().start().unwrap();
        assert_eq!(a, b);
    }
}
