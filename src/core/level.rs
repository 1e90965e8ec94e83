//! Difficulty levels.
//!
//! A level is a fixed search-range preset: `upper = 2^(base + level)` and
//! `lower = -upper`. The table is precomputed once for levels `0..=MAX_LEVEL`
//! and shared by the mystery draw and every automated player's initial
//! interval.

use serde::{Deserialize, Serialize};

use super::{GameError, Value};

/// Highest level in the table.
pub const MAX_LEVEL: u8 = 100;

/// Exponent of level 0's upper bound.
pub const BASE_EXPONENT: u32 = 5;

/// Largest base exponent whose level `MAX_LEVEL` still fits in a `Value`.
const MAX_BASE_EXPONENT: u32 = 126 - MAX_LEVEL as u32;

/// One level: an identifier and its inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    id: u8,
    upper: Value,
    lower: Value,
}

impl Level {
    /// Level identifier.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn upper(&self) -> Value {
        self.upper
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn lower(&self) -> Value {
        self.lower
    }

    /// Whether `value` lies inside the level's range.
    #[must_use]
    pub fn contains(&self, value: Value) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} [{}, {}]", self.id, self.lower, self.upper)
    }
}

/// Precomputed level table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    /// The standard table: level 0 spans `[-32, 32]`.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_base(BASE_EXPONENT)
    }

    /// Build a table whose level 0 spans `±2^base`.
    ///
    /// `base` is clamped so that the top level still fits in a `Value`.
    #[must_use]
    pub fn with_base(base: u32) -> Self {
        let base = base.min(MAX_BASE_EXPONENT);
        let levels = (0..=MAX_LEVEL)
            .map(|id| {
                let upper: Value = 1 << (base + id as u32);
                Level {
                    id,
                    upper,
                    lower: -upper,
                }
            })
            .collect();

        Self { levels }
    }

    /// Look up a level.
    pub fn get(&self, id: u8) -> Result<Level, GameError> {
        self.levels
            .get(id as usize)
            .copied()
            .ok_or(GameError::UnknownLevel(id))
    }

    /// Number of levels in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; the table holds `MAX_LEVEL + 1` entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate over all levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}
