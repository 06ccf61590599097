//! Observers of a running game.
//!
//! The game and its players never know who is watching. They report
//! through [`GameListener`], and a [`ListenerSet`] fans each notification
//! out to every registered listener in registration order.
//!
//! ## Threading
//!
//! Notifications are delivered synchronously on the thread that produced
//! them, often while that player holds its own lock and its opponent's.
//! Listeners must return promptly and must not call back into the game.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use bool_ring::core::PlayerId;
//! use bool_ring::listener::{EventLog, GameListener, ListenerSet};
//!
//! let log = Arc::new(EventLog::new());
//! let mut listeners = ListenerSet::new();
//! assert!(listeners.add(log.clone()));
//! assert!(!listeners.add(log.clone()));
//!
//! listeners.round_played(PlayerId::new(0), 2);
//! assert_eq!(log.total(PlayerId::new(0)), 2);
//! ```

mod console;
mod event;
mod history;

pub use console::ConsolePrinter;
pub use event::{EventLog, GameEvent};
pub use history::ScoreHistory;

use std::sync::Arc;

use crate::core::PlayerId;
use crate::rules::Score;

/// Receiver of game lifecycle events.
///
/// Implementations handle their own failures; nothing propagates back
/// into the game.
pub trait GameListener: Send + Sync {
    /// The game started with these players, in roster order.
    fn game_started(&self, players: &[PlayerId]);

    /// `player` earned `score` points in one round or settlement.
    fn round_played(&self, player: PlayerId, score: Score);

    /// `player` has no cards left and stopped playing.
    fn finished(&self, player: PlayerId);
}

/// Ordered, duplicate-free collection of listeners.
#[derive(Clone, Default)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn GameListener>>,
}

impl ListenerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns `false` if it was already registered.
    pub fn add(&mut self, listener: Arc<dyn GameListener>) -> bool {
        let ptr = Arc::as_ptr(&listener).cast::<()>();
        if self
            .listeners
            .iter()
            .any(|l| std::ptr::eq(Arc::as_ptr(l).cast::<()>(), ptr))
        {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl GameListener for ListenerSet {
    fn game_started(&self, players: &[PlayerId]) {
        for l in &self.listeners {
            l.game_started(players);
        }
    }

    fn round_played(&self, player: PlayerId, score: Score) {
        for l in &self.listeners {
            l.round_played(player, score);
        }
    }

    fn finished(&self, player: PlayerId) {
        for l in &self.listeners {
            l.finished(player);
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}
