//! Scoring rules for exchanges and end-of-hand settlement.
//!
//! Rules are pure functions of card values. The round protocol in
//! [`crate::ring`] decides when they apply.

pub mod scoring;

pub use scoring::{exchange_score, settlement_score, Score};
