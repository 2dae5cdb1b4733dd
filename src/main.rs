//! Mancala-AI: play or simulate Mancala against search-backed players.
//!
//! ## Usage
//!
//! - `mancala-ai` - Show a demo game (alpha-beta vs random)
//! - `mancala-ai play` - Play against the engine on stdin/stdout
//! - `mancala-ai simulate` - Run a batch of games and report win rates

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use mancala_ai::board::PlayerId;
use mancala_ai::constants::{
    DEFAULT_BATCH_GAMES, DEFAULT_PITS_PER_PLAYER, DEFAULT_PLIES, DEFAULT_STONES_PER_PIT,
};
use mancala_ai::game::Mancala;
use mancala_ai::player::{InteractivePlayer, RandomPlayer, SearchPlayer, Strategy};
use mancala_ai::playout::{GameOutcome, play_game, run_batch_with};
use mancala_ai::search::Algorithm;

/// Mancala-AI: Mancala with minimax and alpha-beta players
#[derive(Parser)]
#[command(name = "mancala-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    board: BoardArgs,

    /// Print search and per-game diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BoardArgs {
    /// Sowing pits per player
    #[arg(long, global = true, default_value_t = DEFAULT_PITS_PER_PLAYER)]
    pits: usize,

    /// Stones in each pit at the start
    #[arg(long, global = true, default_value_t = DEFAULT_STONES_PER_PIT)]
    stones: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single engine-vs-random demo game
    Demo,
    /// Play against a search-backed player
    Play {
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_PLIES)]
        plies: usize,
        /// Search algorithm used by the engine
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AlphaBeta)]
        algorithm: AlgorithmArg,
        /// Let the engine move first
        #[arg(long)]
        human_second: bool,
    },
    /// Play a batch of games and report win/tie statistics
    Simulate {
        /// Number of games
        #[arg(long, default_value_t = DEFAULT_BATCH_GAMES)]
        games: usize,
        /// Strategy for player 1
        #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
        p1: StrategyKind,
        /// Strategy for player 2
        #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
        p2: StrategyKind,
        /// Search depth in plies for search-backed strategies
        #[arg(long, default_value_t = DEFAULT_PLIES)]
        plies: usize,
        /// Seed for random strategies (player 2 uses seed + 1)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Minimax,
    AlphaBeta,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Minimax => Algorithm::Minimax,
            AlgorithmArg::AlphaBeta => Algorithm::AlphaBeta,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Random,
    Minimax,
    AlphaBeta,
}

fn make_strategy(
    kind: StrategyKind,
    plies: usize,
    seed: Option<u64>,
    verbose: bool,
) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Random => match seed {
            Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
            None => Box::new(RandomPlayer::new()),
        },
        StrategyKind::Minimax => Box::new(SearchPlayer::minimax(plies).verbose(verbose)),
        StrategyKind::AlphaBeta => Box::new(SearchPlayer::alpha_beta(plies).verbose(verbose)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let game = Mancala::new(cli.board.pits, cli.board.stones)
        .context("invalid board configuration")?;

    match cli.command {
        Some(Commands::Play {
            plies,
            algorithm,
            human_second,
        }) => run_play(&game, plies, algorithm.into(), human_second, cli.verbose),
        Some(Commands::Simulate {
            games,
            p1,
            p2,
            plies,
            seed,
        }) => {
            let mut p1 = make_strategy(p1, plies, seed, cli.verbose);
            let mut p2 = make_strategy(p2, plies, seed.map(|s| s.wrapping_add(1)), cli.verbose);
            run_simulation(&game, p1.as_mut(), p2.as_mut(), games, cli.verbose)
        }
        Some(Commands::Demo) | None => run_demo(&game, cli.verbose),
    }
}

fn run_demo(game: &Mancala, verbose: bool) -> Result<()> {
    println!("Mancala-AI: alpha-beta({DEFAULT_PLIES}) vs random\n");
    println!("{}", game.initial());

    let mut engine = SearchPlayer::alpha_beta(DEFAULT_PLIES).verbose(verbose);
    let mut random = RandomPlayer::new();
    let outcome = play_game(game, &mut engine, &mut random).context("demo game aborted")?;
    announce(&outcome);
    Ok(())
}

fn run_play(
    game: &Mancala,
    plies: usize,
    algorithm: Algorithm,
    human_second: bool,
    verbose: bool,
) -> Result<()> {
    let mut human = InteractivePlayer::stdio();
    let mut engine = SearchPlayer::new(algorithm, plies).verbose(verbose);
    println!(
        "You are {}; the engine plays {algorithm} at {plies} plies.",
        if human_second { PlayerId::Two } else { PlayerId::One }
    );

    let result = if human_second {
        play_game(game, &mut engine, &mut human)
    } else {
        play_game(game, &mut human, &mut engine)
    };
    let outcome = result.context("game aborted")?;
    announce(&outcome);
    Ok(())
}

fn run_simulation(
    game: &Mancala,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    games: usize,
    verbose: bool,
) -> Result<()> {
    println!("{} vs {}, {games} games", p1.name(), p2.name());
    let stats = run_batch_with(game, p1, p2, games, |i, outcome| {
        if verbose {
            eprintln!(
                "game {} score={} moves={:?}",
                i + 1,
                outcome.final_score,
                outcome.moves
            );
        }
    })
    .context("simulation aborted")?;
    println!();
    print!("{stats}");
    Ok(())
}

fn announce(outcome: &GameOutcome) {
    print!("{}", outcome.final_state.board);
    match outcome.winner {
        Some(player) => println!("{player} won!"),
        None => println!("Tie!"),
    }
}
