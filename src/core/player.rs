//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A player's identity is its position in the roster. It displays as a
//! spreadsheet-style label: `A`, `B`, ..., `Z`, `AA`, `AB`, ...
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of single-letter labels.
pub const LETTERS: usize = 26;

/// Player identifier, assigned in roster order.
///
/// Player indices are 0-based: the first player is `PlayerId(0)` and is
/// labelled `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a roster of `player_count` players.
    ///
    /// ```
    /// use bool_ring::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u32).map(PlayerId)
    }

    /// Human-readable label for this player.
    ///
    /// ```
    /// use bool_ring::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).label(), "A");
    /// assert_eq!(PlayerId::new(25).label(), "Z");
    /// assert_eq!(PlayerId::new(26).label(), "AA");
    /// ```
    #[must_use]
    pub fn label(self) -> String {
        let mut n = self.0 as u64 + 1;
        let mut bytes = Vec::new();
        while n > 0 {
            let rem = ((n - 1) % LETTERS as u64) as u8;
            bytes.push(b'A' + rem);
            n = (n - 1) / LETTERS as u64;
        }
        bytes.reverse();
        bytes.into_iter().map(char::from).collect()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use bool_ring::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i64> = PlayerMap::with_value(3, 0);
/// scores[PlayerId::new(1)] += 2;
/// assert_eq!(scores[PlayerId::new(1)], 2);
/// assert_eq!(scores.get(PlayerId::new(7)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// One entry per player, built by `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// One copy of `value` per player.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// `T::default()` for every player.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Roster size.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Entry for `player`; `None` outside the roster.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable entry for `player`; `None` outside the roster.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// `(player, entry)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u32), v))
    }

    /// Entries in roster order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
