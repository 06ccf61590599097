//! Scoring rules.
//!
//! | mine  | other | score |
//! |-------|-------|-------|
//! | true  | true  | 1     |
//! | false | false | 1     |
//! | true  | false | 2     |
//! | false | true  | 0     |
//!
//! The opponent scores the same exchange with the roles swapped, so every
//! exchange awards exactly 2 points in total.

/// Score type for round deltas and cumulative totals.
pub type Score = i64;

/// Score earned by the owner of `mine` when it meets `other`.
///
/// ```
/// use bool_ring::rules::exchange_score;
///
/// assert_eq!(exchange_score(true, false), 2);
/// assert_eq!(exchange_score(false, true), 0);
/// assert_eq!(exchange_score(true, true), 1);
/// ```
#[must_use]
pub const fn exchange_score(mine: bool, other: bool) -> Score {
    if mine == other {
        1
    } else if mine {
        2
    } else {
        0
    }
}

/// Score for cards settled without an opponent: one point per `true` card.
#[must_use]
pub fn settlement_score(cards: &[bool]) -> Score {
    cards.iter().filter(|&&c| c).count() as Score
}
