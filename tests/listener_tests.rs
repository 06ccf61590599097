//! Stock listeners attached to real games.

use std::sync::Arc;

use bool_ring::core::{Dealer, Hand, PlayerId};
use bool_ring::game::Game;
use bool_ring::listener::{ConsolePrinter, EventLog, GameListener, ScoreHistory};
use bool_ring::rules::Score;

const A: PlayerId = PlayerId::new(0);
const B: PlayerId = PlayerId::new(1);

fn two_player_game() -> Game {
    Game::new(vec![Hand::from([true, false]), Hand::from([false, true])]).unwrap()
}

// =============================================================================
// ConsolePrinter
// =============================================================================

#[test]
fn test_console_transcript() {
    let mut game = two_player_game();
    let printer = Arc::new(ConsolePrinter::new(Vec::new()));
    game.add_listener(printer.clone());
    game.play().unwrap();

    let printer = Arc::try_unwrap(printer).ok().expect("game released its listeners");
    let text = String::from_utf8(printer.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "A and B have started a game.");
    assert_eq!(lines.len(), 1 + 4 + 2);

    let mut earned: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with("Player")).collect();
    earned.sort_unstable();
    assert_eq!(
        earned,
        vec![
            "Player A earned 0 points.",
            "Player A earned 2 points.",
            "Player B earned 0 points.",
            "Player B earned 2 points.",
        ]
    );
    assert!(lines.contains(&"A finished."));
    assert!(lines.contains(&"B finished."));
}

#[test]
fn test_console_without_rounds() {
    let mut game = Game::new(Dealer::new(1).deal(5, 1..=16)).unwrap();
    let printer = Arc::new(ConsolePrinter::new(Vec::new()).without_rounds());
    game.add_listener(printer.clone());
    game.play().unwrap();

    let printer = Arc::try_unwrap(printer).ok().expect("game released its listeners");
    let text = String::from_utf8(printer.into_inner()).unwrap();

    assert!(text.starts_with("A, B, C, D and E have started a game.\n"));
    assert!(!text.contains("earned"));
    assert_eq!(text.lines().filter(|l| l.ends_with("finished.")).count(), 5);
}

// =============================================================================
// ScoreHistory
// =============================================================================

#[test]
fn test_history_ends_at_final_score() {
    let mut game = Game::new(Dealer::new(17).deal(6, 1..=24)).unwrap();
    let history = Arc::new(ScoreHistory::new());
    game.add_listener(history.clone());

    let report = game.play().unwrap();
    for standing in &report.standings {
        assert_eq!(history.latest(standing.player), standing.score);

        // Cumulative scores never decrease.
        let series = history.series(standing.player);
        assert!(series.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_history_render_two_players() {
    let mut game = two_player_game();
    let history = Arc::new(ScoreHistory::new());
    game.add_listener(history.clone());
    game.play().unwrap();

    assert_eq!(history.series(A), vec![2, 2]);
    assert_eq!(history.series(B), vec![0, 2]);
    assert_eq!(history.render(), "A: 2 2\nB: 0 2\n");
}

// =============================================================================
// Fan-out
// =============================================================================

/// Every registered listener sees the same events.
#[test]
fn test_listeners_see_same_rounds() {
    let mut game = Game::new(Dealer::new(23).deal(4, 1..=16)).unwrap();
    let first = Arc::new(EventLog::new());
    let second = Arc::new(EventLog::new());
    game.add_listener(first.clone());
    game.add_listener(second.clone());

    let report = game.play().unwrap();
    assert_eq!(first.events(), second.events());
    for player in PlayerId::all(4) {
        assert_eq!(first.total(player), report.score(player).unwrap());
    }
}

/// A listener that only counts, written against the trait directly.
#[derive(Default)]
struct Counter {
    rounds: std::sync::atomic::AtomicUsize,
    points: std::sync::atomic::AtomicI64,
}

impl GameListener for Counter {
    fn game_started(&self, _players: &[PlayerId]) {}

    fn round_played(&self, _player: PlayerId, score: Score) {
        use std::sync::atomic::Ordering::Relaxed;
        self.rounds.fetch_add(1, Relaxed);
        self.points.fetch_add(score, Relaxed);
    }

    fn finished(&self, _player: PlayerId) {}
}

#[test]
fn test_custom_listener() {
    let mut game = Game::new(vec![Hand::from([true, true, true]), Hand::default()]).unwrap();
    let counter = Arc::new(Counter::default());
    game.add_listener(counter.clone());

    let report = game.play().unwrap();
    assert_eq!(counter.rounds.load(std::sync::atomic::Ordering::Relaxed), 1);
    assert_eq!(counter.points.load(std::sync::atomic::Ordering::Relaxed), report.total());
}
