//! Match engine: state machine, round loop and win detection.
//!
//! ## States
//!
//! ```text
//! Idle --run--> Running --exact guess--> Stopping --end of round--> Stopped --reset--> Idle
//!                  |                                                   ^
//!                  +--------- interrupt / round limit -----------------+
//! ```
//!
//! A round always finishes once someone has won, so every automated player
//! gets the last round's feedback. An interrupt is the exception: the match
//! stops at once and the rest of the round is skipped.

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::report::{MatchEnd, MatchObserver, MatchSummary, RoundEntry, RoundReport};
use crate::core::{GameConfig, GameError, GameRng, Level, LevelTable, PlayerId, Value};
use crate::feedback::{Identifier, Relation};
use crate::players::{Player, PlayerKind};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    Idle,
    Running,
    /// Someone guessed the mystery; the current round is being finished.
    Stopping,
    Stopped,
}

/// Termination flag raised by an exact guess.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    #[default]
    None,
    Stop,
}

/// Owns the players, the level and one match's worth of state.
pub struct MatchEngine {
    config: GameConfig,
    levels: LevelTable,
    level: Level,
    players: Vec<Box<dyn Player>>,
    observers: Vec<Box<dyn MatchObserver>>,
    rng: GameRng,

    state: MatchState,
    mystery: Option<Value>,
    turn: u32,
    winners: Vec<PlayerId>,
    termination: Termination,
    last_feedback: Vec<Option<Identifier>>,
}

impl MatchEngine {
    /// Create an idle engine for `config`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let levels = config.level_table();
        let level = levels.get(config.level)?;
        let rng = GameRng::new(config.seed).for_context("mystery");

        Ok(Self {
            config,
            levels,
            level,
            players: Vec::new(),
            observers: Vec::new(),
            rng,
            state: MatchState::Idle,
            mystery: None,
            turn: 0,
            winners: Vec::new(),
            termination: Termination::None,
            last_feedback: Vec::new(),
        })
    }

    // === Setup ===

    /// Register a player. Returns its seat, or `None` while a match is in
    /// progress or when every seat is taken.
    pub fn register_player<P: Player + 'static>(&mut self, player: P) -> Option<PlayerId> {
        self.register_boxed(Box::new(player))
    }

    pub fn register_boxed(&mut self, mut player: Box<dyn Player>) -> Option<PlayerId> {
        if self.is_running() {
            warn!("cannot register {} while a match is running", player.name());
            return None;
        }
        let seat = u8::try_from(self.players.len()).ok().map(PlayerId::new)?;

        player.seat(seat);
        debug!("registered {} as {}", player.name(), seat);
        self.players.push(player);
        Some(seat)
    }

    /// Change the active level and restart every seated player's search
    /// from it. Ignored while a match is in progress.
    pub fn set_level(&mut self, level: u8) -> Result<(), GameError> {
        let level = self.levels.get(level)?;
        if self.is_running() {
            warn!("cannot change level while a match is running");
            return Ok(());
        }
        self.level = level;
        for player in self.players.iter_mut() {
            player.set_level(level);
        }
        debug!("level set to {}", level);
        Ok(())
    }

    pub fn add_observer(&mut self, observer: Box<dyn MatchObserver>) {
        self.observers.push(observer);
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// True while Running or Stopping.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, MatchState::Running | MatchState::Stopping)
    }

    #[must_use]
    pub fn mystery(&self) -> Option<Value> {
        self.mystery
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&dyn Player> {
        self.players.get(seat.index()).map(|p| p.as_ref())
    }

    /// Display name of a seat, empty if the seat does not exist.
    #[must_use]
    pub fn player_name(&self, seat: PlayerId) -> &str {
        self.player(seat).map_or("", |p| p.name())
    }

    /// The identifier produced by a seat's most recent guess.
    #[must_use]
    pub fn last_feedback(&self, seat: PlayerId) -> Option<Identifier> {
        self.last_feedback.get(seat.index()).copied().flatten()
    }

    // === Match ===

    /// Draw a mystery from the active level, or take the configured one.
    pub fn draw_mystery(&mut self) -> Value {
        let mystery = match self.config.fixed_mystery {
            Some(fixed) => fixed,
            None => self.rng.gen_inclusive(self.level.lower(), self.level.upper()),
        };
        self.mystery = Some(mystery);
        mystery
    }

    /// Classify a guess against the mystery. An exact guess records the
    /// seat as a winner and raises the termination flag.
    pub fn scan_value(&mut self, player: PlayerId, value: Value) -> Result<Identifier, GameError> {
        let mystery = self
            .mystery
            .ok_or_else(|| GameError::Precondition("mystery number is missing".to_string()))?;

        let relation = Relation::classify(value, mystery);
        if relation.is_exact() {
            self.winners.push(player);
            self.termination = Termination::Stop;
            if self.state == MatchState::Running {
                self.state = MatchState::Stopping;
            }
        }

        trace!("{} guessed {} ({})", player, value, relation);
        Ok(Identifier::new(player, relation, value))
    }

    /// Play one match to completion. The engine is left Stopped; call
    /// [`reset`](Self::reset) before the next match.
    pub fn run(&mut self) -> Result<MatchSummary, GameError> {
        if self.state != MatchState::Idle {
            return Err(GameError::Precondition(format!(
                "match must be idle to run, it is {:?}",
                self.state
            )));
        }
        if self.players.is_empty() {
            return Err(GameError::Precondition("no players registered".to_string()));
        }

        let mystery = self.draw_mystery();
        let player_count = self.players.len();
        self.state = MatchState::Running;
        self.turn = 0;
        self.termination = Termination::None;
        self.last_feedback = vec![None; player_count];

        for player in self.players.iter_mut() {
            if player.kind() == PlayerKind::Automated {
                player.tell(player_count);
            }
        }

        info!("match started: {}, {} player(s)", self.level, player_count);
        debug!("mystery is {}", mystery);
        let level = self.level;
        for observer in self.observers.iter_mut() {
            observer.on_start(&level, player_count);
        }

        let end = match self.play_rounds() {
            Ok(end) => end,
            Err(err) => {
                self.state = MatchState::Stopped;
                return Err(err);
            }
        };

        let summary = MatchSummary {
            level: self.level,
            mystery,
            turns: self.turn,
            winners: self.winners.clone(),
            winner_names: self
                .winners
                .iter()
                .map(|&w| self.player_name(w).to_string())
                .collect(),
            end,
        };
        info!("{}", summary);
        for observer in self.observers.iter_mut() {
            observer.on_end(&summary);
        }
        Ok(summary)
    }

    /// Run a match, then reset for the next one.
    pub fn start(&mut self) -> Result<MatchSummary, GameError> {
        let result = self.run();
        self.reset();
        result
    }

    /// Clear match state and reset every player. The player list and
    /// level are kept.
    pub fn reset(&mut self) {
        if self.is_running() {
            warn!("cannot reset while a match is running");
            return;
        }
        self.mystery = None;
        self.winners.clear();
        self.turn = 0;
        self.termination = Termination::None;
        self.last_feedback.clear();
        self.state = MatchState::Idle;
        for player in self.players.iter_mut() {
            player.reset();
        }
    }

    fn play_rounds(&mut self) -> Result<MatchEnd, GameError> {
        loop {
            self.turn += 1;
            let mut entries = Vec::with_capacity(self.players.len());

            for index in 0..self.players.len() {
                let seat = PlayerId::new(index as u8);
                let guess = match self.players[index].get() {
                    Ok(guess) => guess,
                    Err(GameError::Interrupted) => {
                        info!("{} interrupted the match on turn {}", self.player_name(seat), self.turn);
                        self.state = MatchState::Stopped;
                        return Ok(MatchEnd::Interrupted);
                    }
                    Err(err) => return Err(err),
                };

                let identifier = self.scan_value(seat, guess)?;
                self.broadcast(identifier)?;
                self.last_feedback[index] = Some(identifier);
                entries.push(RoundEntry {
                    seat,
                    name: self.player_name(seat).to_string(),
                    value: guess,
                    relation: identifier.relation,
                });
            }

            let report = RoundReport {
                turn: self.turn,
                entries,
            };
            for observer in self.observers.iter_mut() {
                observer.on_round(&report);
            }

            if self.termination == Termination::Stop {
                self.state = MatchState::Stopped;
                return Ok(MatchEnd::Won);
            }
            if self.config.max_rounds.is_some_and(|limit| self.turn >= limit) {
                info!("no winner after {} round(s), stopping", self.turn);
                self.state = MatchState::Stopped;
                return Ok(MatchEnd::RoundLimit);
            }
        }
    }

    fn broadcast(&mut self, identifier: Identifier) -> Result<(), GameError> {
        for player in self.players.iter_mut() {
            if player.kind() == PlayerKind::Automated {
                player.push_feedback(identifier)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("state", &self.state)
            .field("level", &self.level)
            .field("players", &self.players.len())
            .field("turn", &self.turn)
            .field("winners", &self.winners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{AutomatedPlayer, HumanPlayer, InputEvent, ScriptedInput};

    fn engine(config: GameConfig) -> MatchEngine {
        MatchEngine::new(config).unwrap()
    }

    fn bot(engine: &MatchEngine, name: &str, seed: u64) -> AutomatedPlayer {
        AutomatedPlayer::with_seed(name, engine.level(), seed)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine(GameConfig::default());
        assert_eq!(engine.state(), MatchState::Idle);
        assert_eq!(engine.level().upper(), 1024);
        assert_eq!(engine.mystery(), None);
        assert_eq!(engine.termination(), Termination::None);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(matches!(
            MatchEngine::new(GameConfig::default().with_level(200)),
            Err(GameError::UnknownLevel(200))
        ));

        let mut engine = engine(GameConfig::default());
        assert!(engine.set_level(101).is_err());
        engine.set_level(0).unwrap();
        assert_eq!(engine.level().upper(), 32);
    }

    #[test]
    fn test_scan_value_requires_mystery() {
        let mut engine = engine(GameConfig::default());
        assert!(matches!(
            engine.scan_value(PlayerId::new(0), 3),
            Err(GameError::Precondition(_))
        ));
    }

    #[test]
    fn test_scan_value_classifies() {
        let mut engine = engine(GameConfig::default().with_fixed_mystery(7));
        engine.draw_mystery();

        let high = engine.scan_value(PlayerId::new(0), 10).unwrap();
        let low = engine.scan_value(PlayerId::new(1), -5).unwrap();
        assert_eq!(high.relation, Relation::TooHigh);
        assert_eq!(low.relation, Relation::TooLow);
        assert!(engine.winners().is_empty());

        let exact = engine.scan_value(PlayerId::new(1), 7).unwrap();
        assert_eq!(exact.relation, Relation::Exact);
        assert_eq!(engine.winners(), &[PlayerId::new(1)]);
        assert_eq!(engine.termination(), Termination::Stop);
    }

    #[test]
    fn test_registration_rejected_while_running() {
        let mut engine = engine(GameConfig::default());
        engine.state = MatchState::Running;

        let b = bot(&engine, "Bot-0", 1);
        assert_eq!(engine.register_player(b), None);
        assert_eq!(engine.player_count(), 0);

        engine.set_level(0).unwrap();
        assert_eq!(engine.level().id(), 5);
    }

    #[test]
    fn test_set_level_reaches_seated_bots() {
        let mut engine = engine(GameConfig::default().with_seed(4));
        let b = bot(&engine, "Bot-0", 1);
        engine.register_player(b);
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().interval(), Some((-1024, 1024)));

        engine.set_level(0).unwrap();
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().interval(), Some((-32, 32)));

        let summary = engine.start().unwrap();
        assert!(engine.level().contains(summary.mystery));
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().interval(), Some((-32, 32)));
    }

    #[test]
    fn test_set_level_ignored_by_running_bots() {
        let mut engine = engine(GameConfig::default());
        let b = bot(&engine, "Bot-0", 1);
        engine.register_player(b);
        engine.state = MatchState::Running;

        engine.set_level(0).unwrap();
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().interval(), Some((-1024, 1024)));
    }

    #[test]
    fn test_run_requires_players() {
        let mut engine = engine(GameConfig::default());
        assert!(matches!(engine.run(), Err(GameError::Precondition(_))));
        assert_eq!(engine.state(), MatchState::Idle);
    }

    #[test]
    fn test_run_twice_requires_reset() {
        let mut engine = engine(GameConfig::default().with_level(0));
        let b = bot(&engine, "Bot-0", 1);
        engine.register_player(b);

        engine.run().unwrap();
        assert_eq!(engine.state(), MatchState::Stopped);
        assert!(matches!(engine.run(), Err(GameError::Precondition(_))));

        engine.reset();
        assert_eq!(engine.state(), MatchState::Idle);
        assert!(engine.run().is_ok());
    }

    #[test]
    fn test_single_bot_finds_mystery() {
        let mut engine = engine(GameConfig::default().with_level(0).with_fixed_mystery(7));
        let b = bot(&engine, "Bot-0", 3);
        engine.register_player(b);

        let summary = engine.run().unwrap();
        assert_eq!(summary.end, MatchEnd::Won);
        assert_eq!(summary.winners, vec![PlayerId::new(0)]);
        assert_eq!(summary.winner_names, vec!["Bot-0".to_string()]);
        assert_eq!(summary.mystery, 7);
        assert_eq!(engine.state(), MatchState::Stopped);
        assert_eq!(engine.last_feedback(PlayerId::new(0)).unwrap().value, 7);
    }

    #[test]
    fn test_interrupt_stops_immediately() {
        let mut engine = engine(GameConfig::default().with_level(0).with_fixed_mystery(7));
        let b = bot(&engine, "Bot-0", 3);
        engine.register_player(HumanPlayer::new("Ann", ScriptedInput::new([InputEvent::Interrupt])));
        engine.register_player(b);

        let summary = engine.run().unwrap();
        assert_eq!(summary.end, MatchEnd::Interrupted);
        assert_eq!(summary.turns, 1);
        assert_eq!(engine.state(), MatchState::Stopped);
        // The bot never got to guess.
        assert!(engine.player(PlayerId::new(1)).unwrap().history().is_empty());
    }

    #[test]
    fn test_round_limit() {
        let mut engine = engine(
            GameConfig::default()
                .with_level(0)
                .with_fixed_mystery(7)
                .with_max_rounds(2),
        );
        engine.register_player(HumanPlayer::new("Ann", ScriptedInput::lines(["1", "2", "3"])));

        let summary = engine.run().unwrap();
        assert_eq!(summary.end, MatchEnd::RoundLimit);
        assert_eq!(summary.turns, 2);
        assert!(!summary.has_winner());
    }

    #[test]
    fn test_reset_keeps_players_and_level() {
        let mut engine = engine(GameConfig::default().with_level(0));
        let b = bot(&engine, "Bot-0", 1);
        engine.register_player(b);
        engine.start().unwrap();

        assert_eq!(engine.state(), MatchState::Idle);
        assert_eq!(engine.player_count(), 1);
        assert_eq!(engine.level().id(), 0);
        assert_eq!(engine.mystery(), None);
        assert_eq!(engine.turn(), 0);
        assert!(engine.winners().is_empty());
        assert!(engine.player(PlayerId::new(0)).unwrap().history().is_empty());
    }
}
