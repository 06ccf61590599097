//! # bool-ring
//!
//! A concurrent card game played around a ring.
//!
//! Every player holds an ordered hand of boolean cards and runs on its own
//! thread. A round pairs a player with the neighbor its next card selects
//! (`true` plays right, `false` plays left); both play one card and score
//! it. When the selected neighbor has no cards left, the player settles the
//! rest of its hand alone. The game ends once every hand is exhausted.
//!
//! ## Design Principles
//!
//! 1. **No global lock during play**: a round holds exactly the two seat
//!    locks it needs. Scores are aggregated on a separate score table.
//!
//! 2. **Deadlock freedom by ranking**: blocking lock acquisitions always go
//!    from lower to higher roster index, with retreat-and-retry against
//!    busy lower-ranked opponents. See [`ring`].
//!
//! 3. **Observers, not output**: the game reports through
//!    [`listener::GameListener`] and never prints on its own.
//!
//! ## Modules
//!
//! - `core`: hands, player IDs, configuration, errors, dealing
//! - `rules`: exchange and settlement scoring
//! - `ring`: seats, the ring table and the round protocol
//! - `listener`: observer trait and stock listeners
//! - `game`: orchestration, completion detection, final report
//! - `parse`: hexadecimal hand source

pub mod core;
pub mod rules;
pub mod ring;
pub mod listener;
pub mod game;
pub mod parse;

// Re-export commonly used types
pub use crate::core::{
    Dealer, GameConfig, GameError, Hand, HandParseError, Naming, PlayerId, PlayerMap,
};

pub use crate::rules::{exchange_score, settlement_score, Score};

pub use crate::ring::{ProtocolCounts, ProtocolStats, RoundLoop, Scorekeeper, Seat, SeatGuard, Table};

pub use crate::listener::{ConsolePrinter, EventLog, GameEvent, GameListener, ListenerSet, ScoreHistory};

pub use crate::game::{FinalReport, Game, Standing};

pub use crate::parse::{parse_hands, read_hands};
