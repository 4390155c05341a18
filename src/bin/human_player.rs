use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tilelink::config::Difficulty;
use tilelink::engine::Point;
use tilelink::logging::{enable_verbose_logging, init_log_file};
use tilelink::session::{
    AfterMatch, GameStatus, HintOutcome, Session, SessionEvent, TapOutcome,
};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the tile-linking puzzle in the terminal", long_about = None)]
struct Args {
    /// Board size and time budget
    #[clap(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for dealing and reshuffling (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,

    /// Log engine decisions
    #[clap(short, long)]
    verbose: bool,

    /// Write verbose logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn print_event(event: SessionEvent) {
    match event {
        SessionEvent::SelectionCleared => {}
        SessionEvent::ComboReset => println!("Combo ended."),
        SessionEvent::HintExpired => {}
        SessionEvent::AutoShuffled => println!("No moves left, the board was reshuffled."),
        SessionEvent::TimeUp => println!("Time is up!"),
    }
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

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session = Session::new(args.difficulty, seed);
    if let Err(e) = session.start() {
        eprintln!("Failed to deal a board: {}", e);
        return ExitCode::FAILURE;
    }
    println!("Welcome to Tile Link! Difficulty: {}, seed: {}", args.difficulty, seed);

    let mut last_tick = Instant::now();
    loop {
        let elapsed = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();
        for event in session.advance(elapsed) {
            print_event(event);
        }

        println!("---------------------");
        println!(
            "Score: {}, Combo: {}, Time: {}s, Hints: {}, Shuffles: {}",
            session.score(),
            session.combo(),
            session.time_left_secs(),
            session.hints(),
            session.shuffles()
        );
        println!("{}", session.board());

        match session.status() {
            GameStatus::Won | GameStatus::Lost => {
                println!("---------------------");
                if session.status() == GameStatus::Won {
                    println!("Board cleared, you win!");
                } else {
                    println!("Game over.");
                }
                println!("Final Score: {}", session.score());
                println!("---------------------");
                print!("Play again? (y/n): ");
                let _ = io::stdout().flush();
                let mut answer = String::new();
                if io::stdin().read_line(&mut answer).is_err() || answer.trim() != "y" {
                    let stats = session.stats();
                    println!(
                        "Games: {}, Wins: {}, High score: {}, Time played: {}s",
                        stats.total_games, stats.wins, stats.high_score, stats.total_time_secs
                    );
                    break;
                }
                if let Err(e) = session.restart() {
                    eprintln!("Failed to deal a board: {}", e);
                    return ExitCode::FAILURE;
                }
                last_tick = Instant::now();
                continue;
            }
            GameStatus::Paused => println!("(paused)"),
            GameStatus::Ready | GameStatus::Playing => {}
        }

        print!("Enter a tile (row col), 'h' hint, 's' shuffle, 'p' pause, 'q' quit: ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        match input.trim() {
            "q" => {
                session.exit();
                println!("Thanks for playing!");
                break;
            }
            "h" => match session.request_hint() {
                HintOutcome::Shown(a, b) => println!("Try {} and {}.", a, b),
                HintOutcome::NoMatch => println!("No removable pair right now."),
                HintOutcome::Unavailable => println!("No hints left."),
            },
            "s" => {
                if session.request_shuffle() {
                    println!("Board reshuffled.");
                } else {
                    println!("No shuffles left.");
                }
            }
            "p" => {
                if !session.pause() {
                    session.resume();
                }
            }
            other => {
                let parts: Vec<&str> = other.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [r, c] => r.parse::<usize>().ok().zip(c.parse::<usize>().ok()),
                    _ => None,
                };
                let Some((r, c)) = parsed else {
                    println!("Invalid input format. Use 'row col', 'h', 's', 'p' or 'q'.");
                    continue;
                };
                match session.tap(Point::new(r, c)) {
                    Ok(TapOutcome::Matched { points, combo, after, .. }) => {
                        println!("Matched! +{} (combo x{})", points, combo);
                        if after == AfterMatch::Stalemate {
                            println!("No moves left, reshuffling...");
                        }
                    }
                    Ok(TapOutcome::Mismatched { .. }) => println!("Those two cannot be linked."),
                    Ok(TapOutcome::Ignored) => println!("Nothing to select there."),
                    Ok(TapOutcome::Selected(_)) | Ok(TapOutcome::Deselected(_)) => {}
                    Err(e) => println!("Invalid tile: {}", e),
                }
            }
        }
    }

    ExitCode::SUCCESS
}
