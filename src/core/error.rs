//! Error types.
//!
//! Construction errors (`NoPlayers`, `TooManyPlayers`) are returned before any
//! player thread starts. The remaining variants describe internal consistency
//! failures that abort a running game.

use thiserror::Error;

use super::PlayerId;

/// Errors raised while building or playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The hand source contained no hands.
    #[error("cannot start a game without players")]
    NoPlayers,

    /// The naming scheme ran out of labels.
    #[error("{count} players requested but only {limit} labels are available")]
    TooManyPlayers { count: usize, limit: usize },

    /// An event referenced a player outside the roster.
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    /// A player's lock was poisoned by a panic mid-round.
    #[error("lock of player {0} was poisoned")]
    LockPoisoned(PlayerId),

    /// The shared score table was poisoned by a panic.
    #[error("score table was poisoned")]
    ScoreboardPoisoned,

    /// A player's thread stopped before finishing its hand.
    #[error("player {0} aborted before finishing")]
    PlayerAborted(PlayerId),

    #[error(transparent)]
    Parse(#[from] HandParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing the textual hand source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandParseError {
    #[error("hand source is empty")]
    Empty,

    #[error("token {index} ({token:?}) is not a 32-bit hexadecimal number")]
    InvalidToken { index: usize, token: String },
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::TooManyPlayers { count: 27, limit: 26 };
        assert_eq!(err.to_string(), "27 players requested but only 26 labels are available");

        let err = GameError::UnknownPlayer(PlayerId::new(3));
        assert_eq!(err.to_string(), "no such player: D");
    }

    #[test]
    fn test_parse_error_converts() {
        let err: GameError = HandParseError::Empty.into();
        assert!(matches!(err, GameError::Parse(HandParseError::Empty)));
        assert_eq!(err.to_string(), "hand source is empty");
    }
}
