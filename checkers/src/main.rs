mod config;
mod display;
mod interactive;

use anyhow::{Context, Result};
use checkers_agents::{evaluate_with, search_with_weights, Agent, MinimaxAgent, RandomAgent};
use checkers_core::{perft_detailed, perft_divide, positions, BoardState, GameOutcome, Side};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use display::{format_moves, print_board};
use interactive::InteractiveGame;
use log::{error, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Checkers rules engine and alpha-beta player")]
struct Cli {
    /// Search depth in plies (clamped to 1-7)
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// Stop searching after this many milliseconds
    #[arg(long, global = true)]
    movetime: Option<u64>,

    /// Start from this position instead of the opening
    #[arg(long, global = true)]
    fen: Option<String>,

    /// TOML file with [search] and [eval] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the engine
    Play {
        /// The side you play
        #[arg(long, value_enum, default_value_t = SideArg::Light)]
        side: SideArg,
    },
    /// Search the position and print the best move
    Search,
    /// Print the static evaluation of the position
    Eval,
    /// Count move-tree leaves to a fixed depth
    Perft {
        depth: u8,
        /// Show the count under each root move
        #[arg(long, default_value_t = false)]
        divide: bool,
    },
    /// Display the position
    Show,
    /// Play engine games against a random or minimax opponent
    Selfplay {
        #[arg(long, default_value_t = 10)]
        games: u32,

        /// Plies before a game is scored as a draw
        #[arg(long, default_value_t = 300)]
        max_plies: u32,

        #[arg(long, value_enum, default_value_t = Opponent::Random)]
        opponent: Opponent,

        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    Light,
    Dark,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Light => Side::Light,
            SideArg::Dark => Side::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Random,
    Minimax,
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "warn" };

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .target(env_logger::Target::Stderr)
    .init();
}

fn load_board(fen: Option<&str>) -> Result<BoardState> {
    match fen {
        Some(fen) => {
            BoardState::from_fen(fen).with_context(|| format!("bad position '{}'", fen))
        }
        None => Ok(BoardState::new()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let limits = config.limits(cli.depth, cli.movetime);
    let board = load_board(cli.fen.as_deref())?;

    let Some(command) = cli.command else {
        print_usage();
        return Ok(());
    };

    match command {
        Command::Play { side } => {
            let engine = match limits.move_time {
                Some(time) => {
                    MinimaxAgent::with_time_limit(limits.max_depth, time.as_millis() as u64)
                }
                None => MinimaxAgent::new(limits.max_depth),
            };
            let engine = engine.with_weights(config.eval);
            InteractiveGame::new(board, side.into(), engine).run()?;
        }
        Command::Search => {
            print_board(&board, &[])?;
            if board.is_over() {
                println!("No legal moves available");
                return Ok(());
            }

            let start = Instant::now();
            let result = search_with_weights(
                board.current_position(),
                board.side_to_move(),
                limits,
                &config.eval,
            );
            let elapsed = start.elapsed();

            match result.best_move {
                Some(best) => {
                    println!("Best move: {}", best);
                    println!("Score: {:.3}", result.score);
                    println!("Depth: {}", result.depth);
                    println!("Nodes: {}", result.nodes);
                    println!("Time: {:.2}s", elapsed.as_secs_f64());
                    for (mv, score) in &result.root_scores {
                        println!("  {}: {:.3}", mv, score);
                    }
                    if result.stopped {
                        println!("(search stopped by time limit)");
                    }
                }
                None => println!("No legal moves available"),
            }
        }
        Command::Eval => {
            print_board(&board, &[])?;
            let score = evaluate_with(board.current_position(), &config.eval);
            println!("Evaluation: {:.3} (+ = Light, - = Dark)", score);
        }
        Command::Perft { depth, divide } => {
            let position = board.current_position();
            let side = board.side_to_move();
            println!("Position: {}", board.to_fen());

            let start = Instant::now();
            if divide {
                let mut total = 0;
                for (mv, count) in perft_divide(position, side, depth) {
                    println!("{}: {}", mv, count);
                    total += count;
                }
                println!("\nTotal: {}", total);
            } else {
                let details = perft_detailed(position, side, depth);
                println!("Nodes: {}", details.nodes);
                println!("Captures: {}", details.captures);
                println!("Promotions: {}", details.promotions);
                println!("Wins: {}", details.wins);
            }
            println!("Time: {:.2}s", start.elapsed().as_secs_f64());
        }
        Command::Show => {
            print_board(&board, &[])?;
            println!("FEN: {}", board.to_fen());
            println!("Legal: {}", format_moves(board.legal_moves().as_slice()));
        }
        Command::Selfplay {
            games,
            max_plies,
            opponent,
            seed,
        } => selfplay(&board, &config, limits.max_depth, games, max_plies, opponent, seed),
    }

    Ok(())
}

fn selfplay(
    start: &BoardState,
    config: &Config,
    depth: u8,
    games: u32,
    max_plies: u32,
    opponent: Opponent,
    seed: u64,
) {
    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);

    for game in 0..games {
        let mut engine = MinimaxAgent::new(depth).with_weights(config.eval);
        let mut other: Box<dyn Agent> = match opponent {
            Opponent::Random => Box::new(RandomAgent::with_seed(seed.wrapping_add(game as u64))),
            Opponent::Minimax => Box::new(MinimaxAgent::new(depth)),
        };
        // Alternate colours between games.
        let engine_side = if game % 2 == 0 { Side::Light } else { Side::Dark };

        let mut board = start.clone();
        let mut plies = 0;
        while !board.is_over() && plies < max_plies {
            let agent: &mut dyn Agent = if board.side_to_move() == engine_side {
                &mut engine
            } else {
                other.as_mut()
            };
            let Some(mv) = agent.best_move(&board) else {
                break;
            };
            if let Err(e) = board.apply(mv) {
                error!("{} produced a rejected move: {}", agent.name(), e);
                break;
            }
            plies += 1;
        }

        let outcome = board.outcome();
        match outcome.winner() {
            Some(side) if side == engine_side => wins += 1,
            Some(_) => losses += 1,
            None => draws += 1,
        }
        info!(
            "game {} ({} as {}): {} after {} plies",
            game + 1,
            engine.name(),
            engine_side,
            outcome,
            plies
        );
        let result = if outcome == GameOutcome::Continuing {
            "draw (ply limit)".to_string()
        } else {
            outcome.to_string()
        };
        println!("Game {}: engine as {} -> {}", game + 1, engine_side, result);
    }

    println!("\nEngine: {} wins, {} losses, {} draws", wins, losses, draws);
}

fn print_usage() {
    println!("Checkers engine");
    println!("Commands:");
    println!("  play [--side light|dark]  - Play against the engine");
    println!("  search                    - Search for the best move");
    println!("  eval                      - Evaluate the position");
    println!("  perft <depth> [--divide]  - Count the move tree");
    println!("  show                      - Display the position");
    println!("  selfplay [--games N]      - Engine matches");
    println!("Global: --depth N --movetime MS --fen FEN --config FILE --debug");
    println!("\nExample positions:");
    println!("  Starting:    {}", positions::STARTING);
    println!("  Double jump: {}", positions::DOUBLE_JUMP);
}
