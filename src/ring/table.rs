//! Roster and ring wiring.

use crate::core::{GameError, Hand, Naming, PlayerId, Result};

use super::Seat;

/// The players of one game, seated in a ring in roster order.
///
/// Player `i` has player `i + 1` on its right and player `i - 1` on its
/// left, wrapping at both ends. A lone player is its own neighbor on both
/// sides.
#[derive(Debug)]
pub struct Table {
    seats: Vec<Seat>,
}

impl Table {
    /// Seat one player per hand, labelled in hand order.
    ///
    /// ```
    /// use bool_ring::core::{Hand, Naming, PlayerId};
    /// use bool_ring::ring::Table;
    ///
    /// let table = Table::new(vec![Hand::from([true]); 3], Naming::Letters).unwrap();
    /// let a = table.seat(PlayerId::new(0)).unwrap();
    /// assert_eq!(a.left(), PlayerId::new(2));
    /// assert_eq!(a.right(), PlayerId::new(1));
    /// assert!(table.is_well_formed());
    /// ```
    pub fn new(hands: Vec<Hand>, naming: Naming) -> Result<Self> {
        let count = hands.len();
        if count == 0 {
            return Err(GameError::NoPlayers);
        }
        naming.check(count)?;
        if u32::try_from(count).is_err() {
            return Err(GameError::TooManyPlayers {
                count,
                limit: u32::MAX as usize,
            });
        }

        let seats = hands
            .into_iter()
            .enumerate()
            .map(|(i, hand)| {
                let left = (i + count - 1) % count;
                let right = (i + 1) % count;
                Seat::new(
                    PlayerId::new(i as u32),
                    hand,
                    PlayerId::new(left as u32),
                    PlayerId::new(right as u32),
                )
            })
            .collect();

        Ok(Self { seats })
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Always false: a table has at least one player.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// The seat of `player`, if it is in the roster.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&Seat> {
        self.seats.get(player.index())
    }

    /// All seats in roster order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// All player IDs in roster order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        self.seats.iter().map(Seat::id).collect()
    }

    /// Total number of cards across all hands.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.seats.iter().map(|s| s.hand().len()).sum()
    }

    /// Check that every player is its left neighbor's right neighbor and
    /// its right neighbor's left neighbor.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.seats.iter().all(|seat| {
            let left_ok = self
                .seat(seat.left())
                .is_some_and(|l| l.right() == seat.id());
            let right_ok = self
                .seat(seat.right())
                .is_some_and(|r| r.left() == seat.id());
            left_ok && right_ok
        })
    }
}
