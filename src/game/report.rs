//! Final scores.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::ring::ProtocolCounts;
use crate::rules::Score;

/// One player's result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Sum of every round score reported for the player.
    pub score: Score,
    /// Final cursor position.
    pub cards_played: usize,
    pub hand_len: usize,
}

/// Aggregate result of a finished game, in roster order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub standings: Vec<Standing>,
    pub stats: ProtocolCounts,
}

impl FinalReport {
    /// The final score of `player`.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<Score> {
        self.standings
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.score)
    }

    /// (player, score) pairs in roster order.
    #[must_use]
    pub fn scores(&self) -> Vec<(PlayerId, Score)> {
        self.standings.iter().map(|s| (s.player, s.score)).collect()
    }

    /// Sum of all final scores.
    #[must_use]
    pub fn total(&self) -> Score {
        self.standings.iter().map(|s| s.score).sum()
    }
}

/// One line per player: `A: 3`.
impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in &self.standings {
            writeln!(f, "{}: {}", s.player, s.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> FinalReport {
        FinalReport {
            standings: vec![
                Standing {
                    player: PlayerId::new(0),
                    score: 3,
                    cards_played: 2,
                    hand_len: 2,
                },
                Standing {
                    player: PlayerId::new(1),
                    score: 1,
                    cards_played: 2,
                    hand_len: 2,
                },
            ],
            stats: ProtocolCounts::default(),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(report().to_string(), "A: 3\nB: 1\n");
    }

    #[test]
    fn test_lookup() {
        let r = report();
        assert_eq!(r.score(PlayerId::new(1)), Some(1));
        assert_eq!(r.score(PlayerId::new(2)), None);
        assert_eq!(r.scores(), vec![(PlayerId::new(0), 3), (PlayerId::new(1), 1)]);
        assert_eq!(r.total(), 4);
    }
}
