//! The round protocol each player thread runs.
//!
//! A round needs two locks: the player's own and its opponent's. Players
//! are ranked by roster index, and a blocking acquisition is only ever
//! made while holding locks of lower rank. That gives the lock graph a
//! total order, so contention cycles of any length cannot form.
//!
//! - Opponent ranks higher: hold own lock, block on the opponent's.
//! - Opponent ranks lower: try the opponent's lock without blocking. If it
//!   is busy, retreat (release own lock, cursor untouched) and start over,
//!   up to `contention_retries` times, then take the opponent's lock and
//!   then our own, and re-check that the next card still selects the same
//!   opponent.
//!
//! Guards are dropped in reverse acquisition order on every path.

use std::thread;

use tracing::{debug, trace};

use crate::core::{GameConfig, GameError, PlayerId, Result};
use crate::rules::exchange_score;

use super::{ProtocolStats, Scorekeeper, Seat, SeatGuard, Table};

/// What a player does after a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Done,
}

/// One player's run through its hand.
pub struct RoundLoop<'a, K: ?Sized> {
    table: &'a Table,
    seat: &'a Seat,
    keeper: &'a K,
    stats: &'a ProtocolStats,
    retries: u32,
}

impl<'a, K> RoundLoop<'a, K>
where
    K: Scorekeeper + ?Sized,
{
    /// Prepare the loop for `player`.
    pub fn new(
        table: &'a Table,
        player: PlayerId,
        keeper: &'a K,
        stats: &'a ProtocolStats,
        config: &GameConfig,
    ) -> Result<Self> {
        let seat = table.seat(player).ok_or(GameError::UnknownPlayer(player))?;
        Ok(Self {
            table,
            seat,
            keeper,
            stats,
            retries: config.contention_retries,
        })
    }

    fn me(&self) -> PlayerId {
        self.seat.id()
    }

    /// Play rounds until the hand is exhausted, then report finished once.
    pub fn run(&self) -> Result<()> {
        let mut attempts = 0;
        loop {
            let mut own = self.seat.lock()?;
            let Some(card) = own.peek() else {
                break;
            };
            let target = self.seat.opponent_for(card);

            let flow = if target == self.me() {
                self.self_round(&mut own, card)?
            } else {
                let opponent = self
                    .table
                    .seat(target)
                    .ok_or(GameError::UnknownPlayer(target))?;

                if self.me() < target {
                    trace!(player = %self.me(), opponent = %target, "waiting for opponent");
                    let mut theirs = opponent.lock()?;
                    self.round(&mut own, &mut theirs, card)?
                } else {
                    match opponent.try_lock()? {
                        Some(mut theirs) => self.round(&mut own, &mut theirs, card)?,
                        None => {
                            drop(own);
                            self.stats.retreat();
                            if attempts < self.retries {
                                attempts += 1;
                                debug!(player = %self.me(), opponent = %target, attempts, "opponent busy, retreating");
                                thread::yield_now();
                                continue;
                            }
                            self.ordered_round(opponent)?
                        }
                    }
                }
            };

            attempts = 0;
            if flow == Flow::Done {
                break;
            }
        }

        debug!(player = %self.me(), "hand exhausted");
        self.keeper.finished(self.me())
    }

    /// Lock a lower-ranked opponent first, then ourselves, and play if the
    /// next card still points at it.
    fn ordered_round(&self, opponent: &Seat) -> Result<Flow> {
        self.stats.ordered();
        debug!(player = %self.me(), opponent = %opponent.id(), "taking locks in roster order");

        let mut theirs = opponent.lock()?;
        let mut own = self.seat.lock()?;

        let Some(card) = own.peek() else {
            return Ok(Flow::Done);
        };
        if self.seat.opponent_for(card) != opponent.id() {
            return Ok(Flow::Continue);
        }
        self.round(&mut own, &mut theirs, card)
    }

    /// Play `card` against a distinct opponent, both locks held.
    fn round(&self, own: &mut SeatGuard<'_>, theirs: &mut SeatGuard<'_>, card: bool) -> Result<Flow> {
        match theirs.exchange(card, self.keeper)? {
            Some(other) => {
                own.advance();
                self.stats.exchange();
                debug!(player = %self.me(), opponent = %theirs.seat().id(), mine = card, other, "exchange");
                self.keeper.round_played(self.me(), exchange_score(card, other))?;
                Ok(Flow::Continue)
            }
            None => {
                debug!(player = %self.me(), opponent = %theirs.seat().id(), remaining = own.remaining().len(), "opponent finished, settling");
                self.settle(own)
            }
        }
    }

    /// A lone player is its own opponent: its next two cards meet each
    /// other. A single leftover card is settled.
    fn self_round(&self, own: &mut SeatGuard<'_>, card: bool) -> Result<Flow> {
        if own.remaining().len() < 2 {
            return self.settle(own);
        }
        own.advance();
        // Answering side reports first, as in any exchange: the second
        // card's score precedes the first card's.
        let Some(other) = own.exchange(card, self.keeper)? else {
            return Ok(Flow::Done);
        };
        self.stats.exchange();
        debug!(player = %self.me(), mine = card, other, "exchange with self");
        self.keeper.round_played(self.me(), exchange_score(card, other))?;
        Ok(Flow::Continue)
    }

    fn settle(&self, own: &mut SeatGuard<'_>) -> Result<Flow> {
        own.settle(self.keeper)?;
        self.stats.settlement();
        Ok(Flow::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hand, Naming};
    use crate::ring::tests::Tally;

    fn table(hands: &[&[bool]]) -> Table {
        Table::new(
            hands.iter().map(|h| Hand::new(h.iter().copied())).collect(),
            Naming::Letters,
        )
        .unwrap()
    }

    fn run_alone(table: &Table, player: u32, tally: &Tally, stats: &ProtocolStats) {
        RoundLoop::new(table, PlayerId::new(player), tally, stats, &GameConfig::default())
            .unwrap()
            .run()
            .unwrap();
    }

    #[test]
    fn test_single_thread_two_players() {
        // A plays every round from its side; B's cards are consumed by A.
        let table = table(&[&[true, false], &[false, true]]);
        let tally = Tally::new(2);
        let stats = ProtocolStats::new();

        run_alone(&table, 0, &tally, &stats);

        assert_eq!(tally.rounds(PlayerId::new(0)), vec![2, 0]);
        assert_eq!(tally.rounds(PlayerId::new(1)), vec![0, 2]);
        assert_eq!(tally.finish_count(PlayerId::new(0)), 1);
        assert_eq!(stats.snapshot().exchanges, 2);

        // B wakes up to an exhausted hand and only reports finished.
        run_alone(&table, 1, &tally, &stats);
        assert_eq!(tally.rounds(PlayerId::new(1)).len(), 2);
        assert_eq!(tally.finish_count(PlayerId::new(1)), 1);
    }

    #[test]
    fn test_settlement_against_finished_opponent() {
        let table = table(&[&[true, false, true, true], &[]]);
        let tally = Tally::new(2);
        let stats = ProtocolStats::new();

        run_alone(&table, 0, &tally, &stats);

        assert_eq!(tally.rounds(PlayerId::new(0)), vec![3]);
        assert!(tally.rounds(PlayerId::new(1)).is_empty());
        assert_eq!(stats.snapshot().settlements, 1);

        let a = table.seat(PlayerId::new(0)).unwrap().lock().unwrap();
        assert!(a.is_exhausted());
    }

    #[test]
    fn test_settlement_after_opponent_runs_out() {
        // A wins one exchange, then B is empty and A settles the rest.
        let table = table(&[&[true, true, false, true], &[false]]);
        let tally = Tally::new(2);
        let stats = ProtocolStats::new();

        run_alone(&table, 0, &tally, &stats);

        assert_eq!(tally.rounds(PlayerId::new(0)), vec![2, 2]);
        assert_eq!(tally.rounds(PlayerId::new(1)), vec![0]);
    }

    #[test]
    fn test_single_player_ring() {
        let table = table(&[&[true, false, true]]);
        let tally = Tally::new(1);
        let stats = ProtocolStats::new();

        run_alone(&table, 0, &tally, &stats);

        // Cards 0 and 1 meet each other, card 2 is settled.
        let a = PlayerId::new(0);
        assert_eq!(tally.rounds(a), vec![0, 2, 1]);
        assert_eq!(tally.finish_count(a), 1);

        let counts = stats.snapshot();
        assert_eq!(counts.exchanges, 1);
        assert_eq!(counts.settlements, 1);
    }

    #[test]
    fn test_retreat_then_ordered_round() {
        // B's card selects A (lower rank). While A's lock is held elsewhere
        // B retreats, then falls back to roster-order locking.
        let table = table(&[&[true], &[false]]);
        let tally = Tally::new(2);
        let stats = ProtocolStats::new();
        let config = GameConfig::default().with_contention_retries(1);

        let held = table.seat(PlayerId::new(0)).unwrap().lock().unwrap();
        thread::scope(|scope| {
            let worker = scope.spawn(|| {
                RoundLoop::new(&table, PlayerId::new(1), &tally, &stats, &config)
                    .unwrap()
                    .run()
            });
            while stats.snapshot().ordered_acquisitions == 0 {
                thread::yield_now();
            }
            drop(held);
            worker.join().unwrap().unwrap();
        });

        let counts = stats.snapshot();
        assert_eq!(counts.retreats, 2);
        assert_eq!(counts.ordered_acquisitions, 1);
        // B's false met A's true.
        assert_eq!(tally.rounds(PlayerId::new(1)), vec![0]);
        assert_eq!(tally.rounds(PlayerId::new(0)), vec![2]);
    }

    #[test]
    fn test_unknown_player() {
        let table = table(&[&[true]]);
        let tally = Tally::new(1);
        let stats = ProtocolStats::new();

        let err = RoundLoop::new(&table, PlayerId::new(5), &tally, &stats, &GameConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GameError::UnknownPlayer(p) if p == PlayerId::new(5)));
    }
}
