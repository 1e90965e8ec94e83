//! Match configuration.
//!
//! `GameConfig` is read once when a match is built and treated as read-only
//! afterwards. It can be assembled with the builder methods or read from a
//! [`ConfigStore`](crate::config::ConfigStore).

use serde::{Deserialize, Serialize};

use super::level::{LevelTable, BASE_EXPONENT};
use super::{GameError, Value};
use crate::config::{ConfigError, ConfigStore};

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Active level (default: 5, range ±1024).
    pub level: u8,

    /// Exponent of level 0's upper bound (default: 5, range ±32).
    pub level_base: u32,

    /// Seed for the mystery draw and every bot stream.
    pub seed: u64,

    /// Debug mode: verbose logging and a throwaway store.
    pub is_debug: bool,

    /// Stop after this many rounds without a winner (`None` = no limit).
    pub max_rounds: Option<u32>,

    /// Use this mystery instead of drawing one. Intended for tests.
    pub fixed_mystery: Option<Value>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: 5,
            level_base: BASE_EXPONENT,
            seed: 42,
            is_debug: true,
            max_rounds: None,
            fixed_mystery: None,
        }
    }
}

impl GameConfig {
    /// Read `GameConfig/*` keys from a store.
    ///
    /// Missing keys keep their defaults; keys of the wrong type are errors.
    pub fn from_store(store: &ConfigStore) -> Result<Self, GameError> {
        let mut config = Self::default();

        if let Some(level) = optional(store.get_u64("GameConfig/Level"))? {
            config.level = u8::try_from(level)
                .map_err(|_| GameError::InvalidArgument(format!("level {level} out of range")))?;
        }
        if let Some(base) = optional(store.get_u64("GameConfig/LevelBase"))? {
            config.level_base = u32::try_from(base).unwrap_or(u32::MAX);
        }
        if let Some(seed) = optional(store.get_u64("GameConfig/Seed"))? {
            config.seed = seed;
        }
        if let Some(debug) = optional(store.get_bool("GameConfig/IsDebug"))? {
            config.is_debug = debug;
        }
        if let Some(rounds) = optional(store.get_u64("GameConfig/MaxRounds"))? {
            config.max_rounds = Some(u32::try_from(rounds).unwrap_or(u32::MAX));
        }

        Ok(config)
    }

    /// Level table built from `level_base`.
    #[must_use]
    pub fn level_table(&self) -> LevelTable {
        LevelTable::with_base(self.level_base)
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    #[must_use]
    pub fn with_fixed_mystery(mut self, mystery: Value) -> Self {
        self.fixed_mystery = Some(mystery);
        self
    }
}

fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::MissingPath(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
