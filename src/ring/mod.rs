//! The ring of players and the pairwise round protocol.
//!
//! ## Key Components
//!
//! - [`Table`]: roster of [`Seat`]s wired into a fixed ring
//! - [`Seat`] / [`SeatGuard`]: one player's hand, cursor and lock
//! - [`RoundLoop`]: the loop each player thread runs
//! - [`Scorekeeper`]: where rounds and finishes are reported
//! - [`ProtocolStats`]: exchange, settlement and contention counters
//!
//! ## Locking
//!
//! Each seat's lock guards only that seat's cursor. A round holds two seat
//! locks at once and nothing else; there is no table-wide lock. See
//! [`round`] for the acquisition order.

mod round;
mod seat;
mod stats;
mod table;

pub use round::RoundLoop;
pub use seat::{Seat, SeatGuard};
pub use stats::{ProtocolCounts, ProtocolStats};
pub use table::Table;

use crate::core::{PlayerId, Result};
use crate::rules::Score;

/// Receiver of round results from player threads.
///
/// Called with one or two seat locks held. An `Err` aborts the reporting
/// player's thread.
pub trait Scorekeeper: Sync {
    /// `player` earned `score` in one exchange or settlement.
    fn round_played(&self, player: PlayerId, score: Score) -> Result<()>;

    /// `player` played its last card. Called exactly once per player.
    fn finished(&self, player: PlayerId) -> Result<()>;
}
