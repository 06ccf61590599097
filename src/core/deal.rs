//! Deterministic random hands.
//!
//! Same seed produces identical hands, so stress runs and CLI sessions can
//! be repeated exactly.
//!
//! ```
//! use bool_ring::core::Dealer;
//!
//! let hands = Dealer::new(42).deal(4, 1..=8);
//! assert_eq!(hands, Dealer::new(42).deal(4, 1..=8));
//! assert!(hands.iter().all(|h| (1..=8).contains(&h.len())));
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Hand;

/// Seeded dealer of random hands.
///
/// Uses ChaCha8 for speed while keeping sequences reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct Dealer {
    inner: ChaCha8Rng,
    seed: u64,
}

impl Dealer {
    /// Create a new dealer with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this dealer was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Deal one hand with a length drawn from `lengths` and fair cards.
    pub fn deal_hand(&mut self, lengths: RangeInclusive<usize>) -> Hand {
        let len = self.inner.gen_range(lengths);
        Hand::new((0..len).map(|_| self.inner.gen_bool(0.5)).collect::<Vec<_>>())
    }

    /// Deal `players` hands.
    pub fn deal(&mut self, players: usize, lengths: RangeInclusive<usize>) -> Vec<Hand> {
        (0..players).map(|_| self.deal_hand(lengths.clone())).collect()
    }

    /// Deal `players` hands of random length where every card is `card`.
    pub fn deal_uniform(
        &mut self,
        players: usize,
        lengths: RangeInclusive<usize>,
        card: bool,
    ) -> Vec<Hand> {
        (0..players)
            .map(|_| {
                let len = self.inner.gen_range(lengths.clone());
                Hand::new(std::iter::repeat(card).take(len))
            })
            .collect()
    }
}
