//! The match: state machine, round loop, reporting and game modes.
//!
//! ## Round flow
//!
//! 1. The engine draws the mystery and tells every automated player how
//!    many players are seated.
//! 2. Each seat, in registration order, produces a guess.
//! 3. The guess is classified and the resulting [`Identifier`] is pushed to
//!    every automated player, the guesser included.
//! 4. Automated players fold the feedback in once the whole round has
//!    arrived.
//! 5. An exact guess ends the match at the end of its round.
//!
//! ## Example
//!
//! ```
//! use mystery_guess::core::GameConfig;
//! use mystery_guess::game::{zero_player, MatchEnd};
//!
//! let config = GameConfig::default().with_level(0).with_seed(7);
//! let mut engine = zero_player(config, 2).unwrap();
//!
//! let summary = engine.start().unwrap();
//! assert_eq!(summary.end, MatchEnd::Won);
//! assert!(summary.has_winner());
//! ```
//!
//! [`Identifier`]: crate::feedback::Identifier

mod engine;
mod modes;
mod report;

pub use engine::{MatchEngine, MatchState, Termination};
pub use modes::{single_player, zero_player, MatchBuilder};
pub use report::{LogObserver, MatchEnd, MatchObserver, MatchSummary, RoundEntry, RoundReport};
