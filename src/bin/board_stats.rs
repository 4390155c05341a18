use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tilelink::config::Difficulty;
use tilelink::generator::generate;
use tilelink::logging::{enable_verbose_logging, init_log_file};
use tilelink::scanner::is_stalemate;
use tilelink::solver::play_out;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Deal seeded boards and report how playable they are", long_about = None)]
struct Args {
    /// Boards to deal per difficulty
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; later boards use consecutive seeds
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Reshuffles allowed per board before it counts as stuck
    #[clap(short = 'r', long, default_value_t = 10)]
    max_reshuffles: u32,

    /// Log engine decisions
    #[clap(short, long)]
    verbose: bool,

    /// Write verbose logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

#[derive(Default)]
struct Tally {
    dealt: u64,
    stalemated_at_deal: u64,
    cleared: u64,
    reshuffles: u64,
    score: u64,
}

impl Tally {
    fn rate(&self, count: u64) -> f64 {
        if self.dealt == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.dealt as f64
        }
    }

    fn average(&self, total: u64) -> f64 {
        if self.dealt == 0 {
            0.0
        } else {
            total as f64 / self.dealt as f64
        }
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

    println!("Dealing {} boards per difficulty...", args.boards);

    let mut tallies: Vec<(Difficulty, Tally)> = Vec::new();
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let mut tally = Tally::default();

        for board_idx in 0..args.boards {
            let current_seed = args.seed + board_idx;
            let mut rng = SmallRng::seed_from_u64(current_seed);
            let mut board = match generate(&config, &mut rng) {
                Ok(board) => board,
                Err(e) => {
                    eprintln!("Error: cannot deal a {} board: {}", difficulty, e);
                    return ExitCode::FAILURE;
                }
            };

            tally.dealt += 1;
            if is_stalemate(&board) {
                tally.stalemated_at_deal += 1;
            }

            let outcome = play_out(&mut board, &mut rng, args.max_reshuffles);
            if outcome.cleared {
                tally.cleared += 1;
            }
            tally.reshuffles += u64::from(outcome.reshuffles);
            tally.score = tally.score.saturating_add(outcome.score);

            if args.verbose {
                println!(
                    "  {:<6} seed {:<6} moves {:<4} reshuffles {:<3} score {:<6} {}",
                    difficulty.to_string(),
                    current_seed,
                    outcome.moves.len(),
                    outcome.reshuffles,
                    outcome.score,
                    if outcome.cleared { "cleared" } else { "stuck" }
                );
            }
        }

        tallies.push((difficulty, tally));
    }

    println!("\n--- Board Statistics ---");
    for (difficulty, tally) in &tallies {
        let config = difficulty.config();
        println!(
            "{:<6} ({}x{}, {} icons): stalemated at deal {:>6.2}%, cleared {:>6.2}%, avg reshuffles {:.2}, avg score {:.1}",
            difficulty.to_string(),
            config.rows,
            config.cols,
            config.icon_types,
            tally.rate(tally.stalemated_at_deal),
            tally.rate(tally.cleared),
            tally.average(tally.reshuffles),
            tally.average(tally.score),
        );
    }

    ExitCode::SUCCESS
}
