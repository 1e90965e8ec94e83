//! Seat identification.
//!
//! ## PlayerId
//!
//! Type-safe seat handle handed out by the match engine at registration.
//! Identity is by seat, not by name: two players may share a display name
//! and still be told apart.

use serde::{Deserialize, Serialize};

/// Seat identifier supporting up to 256 players.
///
/// Seats are 0-based and follow registration order: the first registered
/// player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a match with `player_count` players.
    ///
    /// ```
    /// use mystery_guess::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats.len(), 3);
    /// assert_eq!(seats[0], PlayerId::new(0));
    /// assert_eq!(seats[2], PlayerId::new(2));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(u8::MAX as usize + 1)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
