//! Protocol counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Live counters updated by player threads.
#[derive(Debug, Default)]
pub struct ProtocolStats {
    exchanges: AtomicU64,
    settlements: AtomicU64,
    retreats: AtomicU64,
    ordered: AtomicU64,
}

impl ProtocolStats {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn exchange(&self) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn settlement(&self) {
        self.settlements.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn retreat(&self) {
        self.retreats.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn ordered(&self) {
        self.ordered.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values.
    #[must_use]
    pub fn snapshot(&self) -> ProtocolCounts {
        ProtocolCounts {
            exchanges: self.exchanges.load(Ordering::Relaxed),
            settlements: self.settlements.load(Ordering::Relaxed),
            retreats: self.retreats.load(Ordering::Relaxed),
            ordered_acquisitions: self.ordered.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolCounts {
    /// Two-card exchanges played.
    pub exchanges: u64,
    /// Hands settled against a finished opponent.
    pub settlements: u64,
    /// Times a player released its own lock because its opponent was busy.
    pub retreats: u64,
    /// Times a player gave up retrying and took both locks in roster order.
    pub ordered_acquisitions: u64,
}
