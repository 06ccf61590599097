//! Command-line runner: play one game from a hand file or random hands.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bool_ring::{read_hands, ConsolePrinter, Dealer, Game, GameConfig, GameError, Naming, ScoreHistory};

#[derive(Parser)]
#[command(name = "bool-ring")]
#[command(about = "Play the boolean ring card game, one thread per player")]
struct Args {
    /// File of comma-separated hexadecimal hands
    #[arg(required_unless_present = "random")]
    file: Option<PathBuf>,

    /// Deal this many random hands instead of reading a file
    #[arg(long, conflicts_with = "file")]
    random: Option<usize>,

    /// Maximum cards per random hand
    #[arg(long, default_value = "32")]
    cards: usize,

    /// Seed for random hands
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Label players past Z as AA, AB, ...
    #[arg(long)]
    unbounded_names: bool,

    /// Retreat attempts against a busy opponent before ordered locking
    #[arg(long, default_value = "3")]
    retries: u32,

    /// Print only start, finish and final scores
    #[arg(short, long)]
    quiet: bool,

    /// Print each player's cumulative score series
    #[arg(long)]
    history: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<(), GameError> {
    let hands = match (&args.file, args.random) {
        (_, Some(players)) => {
            info!(players, max_cards = args.cards, seed = args.seed, "dealing random hands");
            Dealer::new(args.seed).deal(players, 1..=args.cards.max(1))
        }
        (Some(path), None) => read_hands(path)?,
        (None, None) => return Err(GameError::NoPlayers),
    };

    let naming = if args.unbounded_names {
        Naming::Unbounded
    } else {
        Naming::Letters
    };
    let config = GameConfig::default()
        .with_naming(naming)
        .with_contention_retries(args.retries);

    let mut game = Game::with_config(hands, config)?;

    let printer = if args.quiet {
        ConsolePrinter::stdout().without_rounds()
    } else {
        ConsolePrinter::stdout()
    };
    game.add_listener(Arc::new(printer));

    let history = Arc::new(ScoreHistory::new());
    if args.history {
        game.add_listener(history.clone());
    }

    let report = game.play()?;
    print!("{report}");
    if args.history {
        print!("{}", history.render());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game failed");
            ExitCode::FAILURE
        }
    }
}
