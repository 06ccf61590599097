//! A player's seat at the table: hand, cursor, lock and neighbors.

use std::sync::{Mutex, MutexGuard, TryLockError};

use tracing::trace;

use crate::core::{GameError, Hand, PlayerId, Result};
use crate::rules::{exchange_score, settlement_score};

use super::Scorekeeper;

/// Mutable part of a seat, guarded by the seat's lock.
#[derive(Debug, Default)]
struct SeatState {
    /// Next unplayed card. Never decreases, never exceeds the hand length.
    cursor: usize,
}

/// One player's place in the ring.
///
/// The hand and neighbors are fixed at construction. Only the cursor
/// changes, and only while the seat's lock is held.
#[derive(Debug)]
pub struct Seat {
    id: PlayerId,
    hand: Hand,
    left: PlayerId,
    right: PlayerId,
    state: Mutex<SeatState>,
}

impl Seat {
    pub(crate) fn new(id: PlayerId, hand: Hand, left: PlayerId, right: PlayerId) -> Self {
        Self {
            id,
            hand,
            left,
            right,
            state: Mutex::new(SeatState::default()),
        }
    }

    /// The player sitting here.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The player's hand.
    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Neighbor on the left (previous in roster order, wrapping).
    #[must_use]
    pub fn left(&self) -> PlayerId {
        self.left
    }

    /// Neighbor on the right (next in roster order, wrapping).
    #[must_use]
    pub fn right(&self) -> PlayerId {
        self.right
    }

    /// The opponent a card selects: `true` plays right, `false` plays left.
    #[must_use]
    pub fn opponent_for(&self, card: bool) -> PlayerId {
        if card {
            self.right
        } else {
            self.left
        }
    }

    /// Block until this seat's lock is held.
    pub fn lock(&self) -> Result<SeatGuard<'_>> {
        let state = self.state.lock().map_err(|_| GameError::LockPoisoned(self.id))?;
        trace!(player = %self.id, "locked");
        Ok(SeatGuard { seat: self, state })
    }

    /// Take this seat's lock if it is free. `Ok(None)` if another player holds it.
    pub fn try_lock(&self) -> Result<Option<SeatGuard<'_>>> {
        match self.state.try_lock() {
            Ok(state) => {
                trace!(player = %self.id, "locked without waiting");
                Ok(Some(SeatGuard { seat: self, state }))
            }
            Err(TryLockError::WouldBlock) => Ok(None),
            Err(TryLockError::Poisoned(_)) => Err(GameError::LockPoisoned(self.id)),
        }
    }
}

/// Exclusive access to a seat's cursor.
///
/// Whoever holds the guard may play the seat's cards: the owner during its
/// own round, or an opponent that holds both locks and calls
/// [`SeatGuard::exchange`] on it.
pub struct SeatGuard<'a> {
    seat: &'a Seat,
    state: MutexGuard<'a, SeatState>,
}

impl<'a> SeatGuard<'a> {
    /// The seat this guard locks.
    #[must_use]
    pub fn seat(&self) -> &'a Seat {
        self.seat
    }

    /// Position of the next unplayed card.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// The next card, without playing it.
    #[must_use]
    pub fn peek(&self) -> Option<bool> {
        self.seat.hand.card(self.state.cursor)
    }

    /// Unplayed cards.
    #[must_use]
    pub fn remaining(&self) -> &[bool] {
        self.seat.hand.remaining(self.state.cursor)
    }

    /// True once every card has been played.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state.cursor >= self.seat.hand.len()
    }

    /// Play the next card.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_exhausted(), "advanced past the end of the hand");
        self.state.cursor = (self.state.cursor + 1).min(self.seat.hand.len());
    }

    /// Answer an opponent's card with this seat's next card.
    ///
    /// Plays the next card, reports this seat's score for the exchange and
    /// returns the card played. Returns `None` without reporting anything if
    /// the hand is already exhausted.
    pub fn exchange<K>(&mut self, other: bool, keeper: &K) -> Result<Option<bool>>
    where
        K: Scorekeeper + ?Sized,
    {
        let Some(mine) = self.peek() else {
            return Ok(None);
        };
        self.advance();
        keeper.round_played(self.seat.id, exchange_score(mine, other))?;
        Ok(Some(mine))
    }

    /// Score every unplayed card against no one and mark the hand played.
    ///
    /// Reports a single round with one point per `true` card.
    pub fn settle<K>(&mut self, keeper: &K) -> Result<()>
    where
        K: Scorekeeper + ?Sized,
    {
        let score = settlement_score(self.remaining());
        self.state.cursor = self.seat.hand.len();
        keeper.round_played(self.seat.id, score)
    }
}

impl std::fmt::Debug for SeatGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatGuard")
            .field("player", &self.seat.id)
            .field("cursor", &self.state.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::tests::Tally;

    fn seat(cards: &[bool]) -> Seat {
        Seat::new(
            PlayerId::new(0),
            Hand::new(cards.iter().copied()),
            PlayerId::new(2),
            PlayerId::new(1),
        )
    }

    #[test]
    fn test_opponent_for() {
        let s = seat(&[true]);
        assert_eq!(s.opponent_for(true), PlayerId::new(1));
        assert_eq!(s.opponent_for(false), PlayerId::new(2));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let s = seat(&[false, true]);
        let mut guard = s.lock().unwrap();

        assert_eq!(guard.peek(), Some(false));
        assert_eq!(guard.peek(), Some(false));
        guard.advance();
        assert_eq!(guard.peek(), Some(true));
        assert_eq!(guard.cursor(), 1);
    }

    #[test]
    fn test_exchange_reports_and_returns_card() {
        let s = seat(&[false, true]);
        let tally = Tally::new(3);
        let mut guard = s.lock().unwrap();

        // Opponent played true, we answer with false.
        assert_eq!(guard.exchange(true, &tally).unwrap(), Some(false));
        assert_eq!(tally.rounds(PlayerId::new(0)), vec![0]);

        // Opponent played false, we answer with true.
        assert_eq!(guard.exchange(false, &tally).unwrap(), Some(true));
        assert_eq!(tally.rounds(PlayerId::new(0)), vec![0, 2]);

        assert!(guard.is_exhausted());
        assert_eq!(guard.exchange(true, &tally).unwrap(), None);
        assert_eq!(tally.rounds(PlayerId::new(0)).len(), 2);
    }

    #[test]
    fn test_settle_counts_true_cards() {
        let s = seat(&[true, true, false, true]);
        let tally = Tally::new(3);
        let mut guard = s.lock().unwrap();
        guard.advance();

        guard.settle(&tally).unwrap();
        assert_eq!(tally.rounds(PlayerId::new(0)), vec![2]);
        assert!(guard.is_exhausted());
        assert_eq!(guard.cursor(), 4);
    }

    #[test]
    fn test_try_lock_contended() {
        let s = seat(&[true]);
        let held = s.lock().unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| assert!(s.try_lock().unwrap().is_none()));
        });

        drop(held);
        assert!(s.try_lock().unwrap().is_some());
    }
}
