//! User and match-history store.
//!
//! The engine never touches the store. The application records a finished
//! match from its [`MatchSummary`] with [`GameDb::record_match`].
//!
//! Tables live in memory. A non-debug store can be written to and read back
//! from a bincode snapshot file.

use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameError, PlayerId, Value};
use crate::game::MatchSummary;

/// Name of the user every fresh store starts with.
pub const DEBUG_USER: &str = "debug";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(MatchId)
            .map_err(|_| GameError::InvalidArgument(format!("history id '{s}' is not an integer")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// One finished two-seat match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: MatchId,
    pub player0: UserId,
    pub player1: UserId,
    /// 0 or 1 for the winning seat, -1 when nobody won.
    pub winner: i8,
    pub mystery: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameDb {
    users: FxHashMap<UserId, User>,
    history: FxHashMap<MatchId, HistoryRecord>,
    next_user: u64,
}

impl GameDb {
    /// Fresh store holding only the debug user.
    #[must_use]
    pub fn new() -> Self {
        let mut db = Self::default();
        db.add_user(DEBUG_USER);
        db
    }

    /// Fresh store in debug mode, otherwise the snapshot at `path` if one
    /// exists.
    pub fn open(config: &GameConfig, path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        if config.is_debug || !path.exists() {
            return Ok(Self::new());
        }
        Self::load(path)
    }

    // === Users ===

    pub fn add_user(&mut self, name: impl Into<String>) -> UserId {
        let id = UserId(self.next_user);
        self.next_user += 1;
        let name = name.into();
        debug!("added {} ({})", id, name);
        self.users.insert(id, User { id, name });
        id
    }

    pub fn remove_user(&mut self, id: UserId) -> Result<User, GameError> {
        self.users.remove(&id).ok_or(GameError::UserNotFound(id))
    }

    pub fn rename_user(&mut self, id: UserId, name: impl Into<String>) -> Result<(), GameError> {
        let user = self.users.get_mut(&id).ok_or(GameError::UserNotFound(id))?;
        user.name = name.into();
        Ok(())
    }

    pub fn get_user(&self, id: UserId) -> Result<&User, GameError> {
        self.users.get(&id).ok_or(GameError::UserNotFound(id))
    }

    /// All user ids in creation order.
    #[must_use]
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<_> = self.users.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // === History ===

    pub fn add_history(
        &mut self,
        id: MatchId,
        player0: UserId,
        player1: UserId,
        winner: i8,
        mystery: Value,
    ) -> Result<(), GameError> {
        if self.history.contains_key(&id) {
            return Err(GameError::DuplicateHistory(id));
        }
        self.get_user(player0)?;
        self.get_user(player1)?;

        self.history.insert(
            id,
            HistoryRecord {
                id,
                player0,
                player1,
                winner,
                mystery,
            },
        );
        Ok(())
    }

    /// Record a finished match whose seats 0 and 1 belong to `player0` and
    /// `player1`.
    pub fn record_match(
        &mut self,
        id: MatchId,
        player0: UserId,
        player1: UserId,
        summary: &MatchSummary,
    ) -> Result<(), GameError> {
        let winner = if summary.is_winner(PlayerId::new(0)) {
            0
        } else if summary.is_winner(PlayerId::new(1)) {
            1
        } else {
            -1
        };
        self.add_history(id, player0, player1, winner, summary.mystery)
    }

    pub fn get_history(&self, id: MatchId) -> Result<&HistoryRecord, GameError> {
        self.history.get(&id).ok_or(GameError::HistoryNotFound(id))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop everything and start over with only the debug user.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn restore(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        std::fs::write(path, self.snapshot()?)?;
        info!("saved {} user(s) and {} match(es) to {}", self.users.len(), self.history.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let bytes = std::fs::read(path)?;
        Self::restore(&bytes)
    }
}
