//! Core engine types: values, seats, RNG, levels, configuration, errors.
//!
//! Everything here is independent of how a guess is produced. Players,
//! feedback and the match engine are built on top of these types.

pub mod config;
pub mod error;
pub mod level;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::GameError;
pub use level::{Level, LevelTable, BASE_EXPONENT, MAX_LEVEL};
pub use player::PlayerId;
pub use rng::GameRng;

/// Numeric domain of guesses, mysteries and interval bounds.
///
/// Level 100 spans ±2^105, which does not fit in `i64`.
pub type Value = i128;
