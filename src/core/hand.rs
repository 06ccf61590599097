//! A player's hand of boolean cards.
//!
//! Hands are fixed at construction and never modified. Play progress is
//! tracked by a cursor owned by the seat, not by the hand itself.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cards that fit inline before spilling to the heap (one 32-bit word).
pub const INLINE_CARDS: usize = 32;

/// An immutable ordered sequence of boolean cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[bool; INLINE_CARDS]>,
}

impl Hand {
    /// Create a hand from its cards, first card played first.
    pub fn new(cards: impl IntoIterator<Item = bool>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Create a hand from the binary representation of `word`, most
    /// significant set bit first, without leading zeros.
    ///
    /// Zero has the single-digit representation `0`.
    ///
    /// ```
    /// use bool_ring::core::Hand;
    ///
    /// assert_eq!(Hand::from_bits(0b1011).cards(), &[true, false, true, true]);
    /// assert_eq!(Hand::from_bits(0).cards(), &[false]);
    /// ```
    #[must_use]
    pub fn from_bits(word: u32) -> Self {
        if word == 0 {
            return Self::new([false]);
        }
        let width = u32::BITS - word.leading_zeros();
        Self::new((0..width).rev().map(|bit| word & (1 << bit) != 0))
    }

    /// The cards in play order.
    #[must_use]
    pub fn cards(&self) -> &[bool] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the hand holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at `position`, if any.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<bool> {
        self.cards.get(position).copied()
    }

    /// Cards from `position` to the end.
    #[must_use]
    pub fn remaining(&self, position: usize) -> &[bool] {
        self.cards.get(position..).unwrap_or(&[])
    }

    /// Number of `true` cards in the hand.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.cards.iter().filter(|&&c| c).count()
    }
}

impl From<Vec<bool>> for Hand {
    fn from(cards: Vec<bool>) -> Self {
        Self::new(cards)
    }
}

impl<const N: usize> From<[bool; N]> for Hand {
    fn from(cards: [bool; N]) -> Self {
        Self::new(cards)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &card in &self.cards {
            f.write_str(if card { "1" } else { "0" })?;
        }
        Ok(())
    }
}
