//! Game orchestration: roster, player threads, score aggregation and
//! completion detection.
//!
//! ## Lifecycle
//!
//! 1. [`Game::new`] seats one player per hand and wires the ring.
//! 2. [`Game::add_listener`] registers observers.
//! 3. [`Game::play`] starts one thread per player, announces the start,
//!    waits until every player has finished and returns the
//!    [`FinalReport`]. The game is consumed and cannot be replayed.
//!
//! ## Shared State
//!
//! Per-player scores and finished flags live on a score table guarded by
//! its own lock, independent of the seat locks. The coordinator waits on a
//! condition variable tied to that lock and re-checks the whole table on
//! every wake.
//!
//! ## Example
//!
//! ```
//! use bool_ring::core::{Hand, PlayerId};
//! use bool_ring::game::Game;
//!
//! let game = Game::new(vec![Hand::from([true, false]), Hand::from([false, true])]).unwrap();
//! let report = game.play().unwrap();
//! assert_eq!(report.score(PlayerId::new(0)), Some(2));
//! assert_eq!(report.score(PlayerId::new(1)), Some(2));
//! ```

mod report;

pub use report::{FinalReport, Standing};

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::core::{GameConfig, GameError, Hand, PlayerId, PlayerMap, Result};
use crate::listener::{GameListener, ListenerSet};
use crate::ring::{ProtocolStats, RoundLoop, Scorekeeper, Table};
use crate::rules::Score;

/// Scores and completion flags shared by all player threads.
#[derive(Debug)]
struct Scoreboard {
    scores: PlayerMap<Score>,
    finished: PlayerMap<bool>,
    /// First player whose thread stopped without finishing.
    aborted: Option<PlayerId>,
}

impl Scoreboard {
    fn new(players: usize) -> Self {
        Self {
            scores: PlayerMap::with_value(players, 0),
            finished: PlayerMap::with_value(players, false),
            aborted: None,
        }
    }

    fn finished_count(&self) -> usize {
        self.finished.values().filter(|&&f| f).count()
    }

    fn all_finished(&self) -> bool {
        self.finished.values().all(|&f| f)
    }

    fn unfinished(&self) -> Vec<String> {
        self.finished
            .iter()
            .filter(|(_, &f)| !f)
            .map(|(p, _)| p.label())
            .collect()
    }
}

/// Holds player threads until the start has been announced.
///
/// Resolves exactly once: either every player is released to play, or the
/// start is called off and players exit without playing.
#[derive(Default)]
struct StartGate {
    state: Mutex<Option<bool>>,
    resolved: Condvar,
}

impl StartGate {
    /// Block until the gate resolves. Returns `true` if play should go ahead.
    fn wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(go) = *state {
                return go;
            }
            state = self.resolved.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn resolve(&self, go: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.get_or_insert(go);
        drop(state);
        self.resolved.notify_all();
    }

    fn open(&self) {
        self.resolve(true);
    }

    fn cancel(&self) {
        self.resolve(false);
    }
}

/// Calls the start off if the coordinator leaves before opening the gate,
/// including by panic.
struct GateGuard<'a>(&'a StartGate);

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Marks the game aborted if a player thread exits without finishing,
/// including by panic.
struct AbortGuard<'a> {
    game: &'a Game,
    player: PlayerId,
    armed: bool,
}

impl AbortGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.game.abort(self.player);
        }
    }
}

/// A ring game ready to be played.
pub struct Game {
    config: GameConfig,
    table: Table,
    listeners: ListenerSet,
    board: Mutex<Scoreboard>,
    done: Condvar,
    stats: ProtocolStats,
}

impl Game {
    /// Build a game with the default configuration.
    pub fn new(hands: Vec<Hand>) -> Result<Self> {
        Self::with_config(hands, GameConfig::default())
    }

    /// Build a game: one player per hand, labelled `A`, `B`, ... in order.
    ///
    /// Fails with [`GameError::NoPlayers`] for an empty hand list and
    /// [`GameError::TooManyPlayers`] when the naming scheme runs out.
    pub fn with_config(hands: Vec<Hand>, config: GameConfig) -> Result<Self> {
        let table = Table::new(hands, config.naming)?;
        let board = Scoreboard::new(table.len());
        Ok(Self {
            config,
            table,
            listeners: ListenerSet::new(),
            board: Mutex::new(board),
            done: Condvar::new(),
            stats: ProtocolStats::new(),
        })
    }

    /// Register a listener. Registering the same listener twice has no
    /// effect and returns `false`.
    pub fn add_listener(&mut self, listener: Arc<dyn GameListener>) -> bool {
        self.listeners.add(listener)
    }

    /// The seated players.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Player IDs in roster order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        self.table.players()
    }

    /// The configuration this game was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play the game to completion on one thread per player.
    ///
    /// Blocks until every player has finished. Returns the first error a
    /// player thread reported; a panic in a player thread or in a listener's
    /// `game_started` resumes here once every thread has exited.
    pub fn play(self) -> Result<FinalReport> {
        let players = self.players();
        info!(players = players.len(), cards = self.table.card_count(), "starting game");

        let gate = StartGate::default();
        let game = &self;
        let gate = &gate;
        thread::scope(|scope| -> Result<()> {
            let start = GateGuard(gate);
            let mut handles = Vec::with_capacity(players.len());
            for &player in &players {
                let spawned = thread::Builder::new()
                    .name(format!("player-{player}"))
                    .spawn_scoped(scope, move || {
                        if !gate.wait() {
                            debug!(%player, "start called off");
                            return Ok(());
                        }
                        game.run_player(player)
                    });
                handles.push(spawned?);
            }

            game.listeners.game_started(&players);
            gate.open();
            drop(start);
            game.await_finish()?;

            let mut failure = None;
            for handle in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        failure.get_or_insert(err);
                    }
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            if let Some(err) = failure {
                return Err(err);
            }
            match game.board()?.aborted {
                Some(player) => Err(GameError::PlayerAborted(player)),
                None => Ok(()),
            }
        })?;

        let report = self.report()?;
        info!(total = report.total(), stats = ?report.stats, "game over");
        Ok(report)
    }

    fn board(&self) -> Result<MutexGuard<'_, Scoreboard>> {
        self.board.lock().map_err(|_| GameError::ScoreboardPoisoned)
    }

    fn run_player(&self, player: PlayerId) -> Result<()> {
        let guard = AbortGuard {
            game: self,
            player,
            armed: true,
        };
        let result = RoundLoop::new(&self.table, player, self, &self.stats, &self.config)
            .and_then(|round| round.run());
        match &result {
            Ok(()) => guard.disarm(),
            Err(err) => error!(%player, %err, "player aborted"),
        }
        result
    }

    fn abort(&self, player: PlayerId) {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        board.aborted.get_or_insert(player);
        drop(board);
        self.done.notify_all();
    }

    /// Wait until every player has finished or one has aborted.
    fn await_finish(&self) -> Result<()> {
        let mut board = self.board()?;
        loop {
            if board.aborted.is_some() || board.all_finished() {
                return Ok(());
            }
            let before = board.finished_count();
            board = match self.config.stall_warning {
                Some(limit) => {
                    let (board, wait) = self
                        .done
                        .wait_timeout(board, limit)
                        .map_err(|_| GameError::ScoreboardPoisoned)?;
                    if wait.timed_out() && board.finished_count() == before {
                        warn!(waited = ?limit, unfinished = ?board.unfinished(), "no player finished recently");
                    }
                    board
                }
                None => self
                    .done
                    .wait(board)
                    .map_err(|_| GameError::ScoreboardPoisoned)?,
            };
        }
    }

    fn report(&self) -> Result<FinalReport> {
        let cursors = self
            .table
            .seats()
            .iter()
            .map(|seat| seat.lock().map(|guard| guard.cursor()))
            .collect::<Result<Vec<_>>>()?;

        let board = self.board()?;
        let standings = self
            .table
            .seats()
            .iter()
            .zip(cursors)
            .map(|(seat, cards_played)| Standing {
                player: seat.id(),
                score: board.scores[seat.id()],
                cards_played,
                hand_len: seat.hand().len(),
            })
            .collect();

        Ok(FinalReport {
            standings,
            stats: self.stats.snapshot(),
        })
    }
}

impl Scorekeeper for Game {
    fn round_played(&self, player: PlayerId, score: Score) -> Result<()> {
        {
            let mut board = self.board()?;
            let total = board
                .scores
                .get_mut(player)
                .ok_or(GameError::UnknownPlayer(player))?;
            *total += score;
        }
        self.listeners.round_played(player, score);
        Ok(())
    }

    fn finished(&self, player: PlayerId) -> Result<()> {
        {
            let mut board = self.board()?;
            let flag = board
                .finished
                .get_mut(player)
                .ok_or(GameError::UnknownPlayer(player))?;
            debug_assert!(!*flag, "player {player} finished twice");
            *flag = true;
        }
        debug!(%player, "finished");
        self.listeners.finished(player);
        self.done.notify_all();
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("players", &self.table.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}
