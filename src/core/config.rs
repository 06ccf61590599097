//! Game configuration.
//!
//! - `Naming`: how many players can be labelled
//! - `GameConfig`: naming plus lock-contention and diagnostics settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::player::LETTERS;

/// Player labelling scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Naming {
    /// Single letters `A` to `Z`. Larger rosters are rejected.
    #[default]
    Letters,
    /// `A` to `Z`, then `AA`, `AB`, ... without limit.
    Unbounded,
}

impl Naming {
    /// Maximum roster size, `None` if unlimited.
    #[must_use]
    pub fn limit(self) -> Option<usize> {
        match self {
            Naming::Letters => Some(LETTERS),
            Naming::Unbounded => None,
        }
    }

    /// Check that `count` players can be labelled.
    pub fn check(self, count: usize) -> Result<()> {
        match self.limit() {
            Some(limit) if count > limit => Err(GameError::TooManyPlayers { count, limit }),
            _ => Ok(()),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player labelling scheme.
    pub naming: Naming,

    /// Non-blocking retreat-and-retry attempts a player makes against a busy
    /// lower-ranked opponent before taking both locks in roster order.
    pub contention_retries: u32,

    /// Log a warning whenever the coordinator waits this long without a
    /// player finishing. `None` waits silently.
    pub stall_warning: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            naming: Naming::Letters,
            contention_retries: 3,
            stall_warning: Some(Duration::from_secs(5)),
        }
    }
}

impl GameConfig {
    /// Set the labelling scheme.
    #[must_use]
    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Set the number of contention retries.
    #[must_use]
    pub fn with_contention_retries(mut self, retries: u32) -> Self {
        self.contention_retries = retries;
        self
    }

    /// Set or clear the stall warning interval.
    #[must_use]
    pub fn with_stall_warning(mut self, interval: Option<Duration>) -> Self {
        self.stall_warning = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.naming, Naming::Letters);
        assert_eq!(config.contention_retries, 3);
        assert_eq!(config.stall_warning, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_naming(Naming::Unbounded)
            .with_contention_retries(0)
            .with_stall_warning(None);

        assert_eq!(config.naming, Naming::Unbounded);
        assert_eq!(config.contention_retries, 0);
        assert!(config.stall_warning.is_none());
    }

    #[test]
    fn test_naming_limits() {
        assert!(Naming::Letters.check(26).is_ok());
        assert!(matches!(
            Naming::Letters.check(27),
            Err(GameError::TooManyPlayers { count: 27, limit: 26 })
        ));
        assert!(Naming::Unbounded.check(10_000).is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_naming(Naming::Unbounded);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
