//! Core types: hands, players, configuration, errors, dealing.
//!
//! These are plain data types with no threading concerns. The concurrent
//! machinery lives in [`crate::ring`] and [`crate::game`].

pub mod hand;
pub mod player;
pub mod config;
pub mod error;
pub mod deal;

pub use hand::Hand;
pub use player::{PlayerId, PlayerMap};
pub use config::{GameConfig, Naming};
pub use error::{GameError, HandParseError, Result};
pub use deal::Dealer;
