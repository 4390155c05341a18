use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tilelink::config::Difficulty;
use tilelink::engine::{remove_tiles, Board};
use tilelink::generator::generate;
use tilelink::logging::{enable_verbose_logging, init_log_file};
use tilelink::path::find_path;
use tilelink::solver::play_out;
use tilelink::utils::board_from_str_array;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a board out by following hints", long_about = None)]
struct Args {
    /// Path to a board file (one row per line, '.' for empty, 1-9/A-Z for icons).
    /// A board is dealt for the chosen difficulty when omitted.
    board_file: Option<PathBuf>,

    /// Difficulty used when dealing a board
    #[clap(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for dealing and reshuffling
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

    /// Reshuffles allowed before giving up on a stalemate
    #[clap(short = 'r', long, default_value_t = 10)]
    max_reshuffles: u32,

    /// Log engine decisions
    #[clap(short, long)]
    verbose: bool,

    /// Write verbose logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        enable_verbose_logging();
    }
    if let Some(path) = &args.log_file {
        if let Err(e) = init_log_file(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let board = match &args.board_file {
        Some(path) => read_board_file(path).map(|board| {
            println!("Loaded board from {}\n", path.display());
            board
        }),
        None => generate(&args.difficulty.config(), &mut rng)
            .map(|board| {
                println!("Dealt {} board with seed {}\n", args.difficulty, args.seed);
                board
            })
            .map_err(|e| format!("Failed to deal a board: {}", e)),
    };
    let mut board = match board {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Initial board state:\n{}\n", board);
    let start = board.clone();
    let outcome = play_out(&mut board, &mut rng, args.max_reshuffles);

    println!("Moves ({}):", outcome.moves.len());
    if outcome.moves.is_empty() {
        println!("  No moves made.");
    }
    for (i, (a, b)) in outcome.moves.iter().enumerate() {
        // Turn counts are only meaningful before any reshuffle changed the board.
        let turns = if outcome.reshuffles == 0 {
            let mut replay = start.clone();
            for (x, y) in &outcome.moves[..i] {
                let _ = remove_tiles(&mut replay, *x, *y);
            }
            find_path(&replay, *a, *b)
                .ok()
                .flatten()
                .map(|path| format!(", {} turn(s)", path.turns))
                .unwrap_or_default()
        } else {
            String::new()
        };
        println!("  Move {}: {} - {}{}", i + 1, a, b, turns);
    }
    println!("Reshuffles: {}", outcome.reshuffles);
    println!("Score: {}", outcome.score);
    println!(
        "Result: {}\n",
        if outcome.cleared { "cleared" } else { "stuck" }
    );
    println!("Final board state:\n{}", board);

    if outcome.cleared {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
