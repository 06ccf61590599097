//! Recorded game events.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::Score;

use super::GameListener;

/// One notification, as delivered to a listener.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { players: Vec<PlayerId> },
    RoundPlayed { player: PlayerId, score: Score },
    Finished { player: PlayerId },
}

impl GameEvent {
    /// The player this event concerns, if it concerns exactly one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::Started { .. } => None,
            GameEvent::RoundPlayed { player, .. } | GameEvent::Finished { player } => Some(*player),
        }
    }
}

/// Listener that records every event in delivery order.
///
/// Events from different players interleave arbitrarily; events for one
/// player appear in the order that player played them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic in another listener must not hide what was recorded so far.
    fn guard(&self) -> MutexGuard<'_, Vec<GameEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: GameEvent) {
        self.guard().push(event);
    }

    /// Snapshot of all events so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.guard().clone()
    }

    /// Round scores reported for `player`, in order.
    #[must_use]
    pub fn round_scores(&self, player: PlayerId) -> Vec<Score> {
        self.guard()
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundPlayed { player: p, score } if *p == player => Some(*score),
                _ => None,
            })
            .collect()
    }

    /// Sum of round scores reported for `player`.
    #[must_use]
    pub fn total(&self, player: PlayerId) -> Score {
        self.round_scores(player).iter().sum()
    }

    /// Number of round notifications across all players.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.guard()
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundPlayed { .. }))
            .count()
    }

    /// Number of game-started notifications.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.guard()
            .iter()
            .filter(|e| matches!(e, GameEvent::Started { .. }))
            .count()
    }

    /// Number of finished notifications for `player`.
    #[must_use]
    pub fn finished_count(&self, player: PlayerId) -> usize {
        self.guard()
            .iter()
            .filter(|e| matches!(e, GameEvent::Finished { player: p } if *p == player))
            .count()
    }
}

impl GameListener for EventLog {
    fn game_started(&self, players: &[PlayerId]) {
        self.push(GameEvent::Started {
            players: players.to_vec(),
        });
    }

    fn round_played(&self, player: PlayerId, score: Score) {
        self.push(GameEvent::RoundPlayed { player, score });
    }

    fn finished(&self, player: PlayerId) {
        self.push(GameEvent::Finished { player });
    }
}
