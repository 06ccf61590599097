//! Cumulative score series per player.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::core::PlayerId;
use crate::rules::Score;

use super::GameListener;

/// Listener that tracks each player's running total after every round.
///
/// This is the data behind a score-over-time plot: point `i` of a series
/// is the player's cumulative score after its `i + 1`th reported round.
#[derive(Debug, Default)]
pub struct ScoreHistory {
    series: Mutex<FxHashMap<PlayerId, Vec<Score>>>,
    order: Mutex<Vec<PlayerId>>,
}

impl ScoreHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cumulative series for `player`.
    #[must_use]
    pub fn series(&self, player: PlayerId) -> Vec<Score> {
        self.series
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&player)
            .cloned()
            .unwrap_or_default()
    }

    /// The latest cumulative score for `player`.
    #[must_use]
    pub fn latest(&self, player: PlayerId) -> Score {
        self.series(player).last().copied().unwrap_or(0)
    }

    /// One line per player in roster order: `A: 2 2 4`.
    #[must_use]
    pub fn render(&self) -> String {
        let order = self.order.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let mut text = String::new();
        for player in order {
            let points: Vec<String> = self.series(player).iter().map(Score::to_string).collect();
            text.push_str(&format!("{player}: {}\n", points.join(" ")));
        }
        text
    }
}

impl GameListener for ScoreHistory {
    fn game_started(&self, players: &[PlayerId]) {
        let mut series = self.series.lock().unwrap_or_else(PoisonError::into_inner);
        for &p in players {
            series.entry(p).or_default();
        }
        *self.order.lock().unwrap_or_else(PoisonError::into_inner) = players.to_vec();
    }

    fn round_played(&self, player: PlayerId, score: Score) {
        let mut series = self.series.lock().unwrap_or_else(PoisonError::into_inner);
        let points = series.entry(player).or_default();
        let last = points.last().copied().unwrap_or(0);
        points.push(last + score);
    }

    fn finished(&self, _player: PlayerId) {}
}
