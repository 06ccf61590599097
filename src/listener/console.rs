//! Plain-text event printer.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::core::PlayerId;
use crate::rules::Score;

use super::GameListener;

/// Listener that writes one line per event.
///
/// ```text
/// A, B and C have started a game.
/// Player A earned 2 points.
/// A finished.
/// ```
pub struct ConsolePrinter<W> {
    out: Mutex<W>,
    rounds: bool,
}

impl ConsolePrinter<io::Stdout> {
    /// Printer writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsolePrinter<W> {
    /// Printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            rounds: true,
        }
    }

    /// Skip per-round lines, keeping start and finish lines.
    #[must_use]
    pub fn without_rounds(mut self) -> Self {
        self.rounds = false;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_fmt(text).and_then(|()| out.write_all(b"\n")) {
            warn!(%err, "console printer failed to write");
        }
    }
}

/// "A", "A and B", "A, B and C".
fn join_names(players: &[PlayerId]) -> String {
    let mut text = String::new();
    for (i, p) in players.iter().enumerate() {
        text.push_str(&p.label());
        if i + 2 < players.len() {
            text.push_str(", ");
        } else if i + 1 < players.len() {
            text.push_str(" and ");
        }
    }
    text
}

impl<W: Write + Send> GameListener for ConsolePrinter<W> {
    fn game_started(&self, players: &[PlayerId]) {
        self.line(format_args!("{} have started a game.", join_names(players)));
    }

    fn round_played(&self, player: PlayerId, score: Score) {
        if self.rounds {
            self.line(format_args!("Player {player} earned {score} points."));
        }
    }

    fn finished(&self, player: PlayerId) {
        self.line(format_args!("{player} finished."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<PlayerId> {
        (0..n).map(PlayerId::new).collect()
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&ids(1)), "A");
        assert_eq!(join_names(&ids(2)), "A and B");
        assert_eq!(join_names(&ids(4)), "A, B, C and D");
    }

    #[test]
    fn test_lines() {
        let printer = ConsolePrinter::new(Vec::new());
        printer.game_started(&ids(3));
        printer.round_played(PlayerId::new(0), 2);
        printer.finished(PlayerId::new(0));

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(
            text,
            "A, B and C have started a game.\nPlayer A earned 2 points.\nA finished.\n"
        );
    }

    #[test]
    fn test_without_rounds() {
        let printer = ConsolePrinter::new(Vec::new()).without_rounds();
        printer.round_played(PlayerId::new(1), 1);
        printer.finished(PlayerId::new(1));

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(text, "B finished.\n");
    }
}
