/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use threadpool::ThreadPool;
use uci_parser::UciResponse;

use marten::{move_to_uci, perft, train, Board, Evaluator, Searcher, Weights};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Move-ordering weights file to load at startup.
    #[arg(long, global = true)]
    weights: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search a position to a fixed depth or for a fixed time.
    Search {
        /// Position to search; defaults to the starting position.
        #[arg(long)]
        fen: Option<String>,

        /// Search to this depth, in plies.
        #[arg(long, conflicts_with = "movetime")]
        depth: Option<i32>,

        /// Search for this long, in milliseconds.
        #[arg(long)]
        movetime: Option<u64>,
    },

    /// Count leaf nodes to a depth, validating move generation.
    Perft {
        #[arg(default_value_t = 5)]
        depth: i32,

        #[arg(long)]
        fen: Option<String>,
    },

    /// Print the static evaluation of a position.
    Eval {
        #[arg(long)]
        fen: Option<String>,
    },

    /// Train the ordering weights on move-order targets.
    TrainOrder {
        #[arg(long)]
        games: PathBuf,

        #[arg(long, default_value = "search_weights.txt")]
        out: PathBuf,

        /// Start from zeroed weights instead of the weight file.
        #[arg(long)]
        from_scratch: bool,
    },

    /// Train the ordering weights on value targets.
    TrainValue {
        #[arg(long)]
        games: PathBuf,

        #[arg(long, default_value = "search_weights.txt")]
        out: PathBuf,

        #[arg(long)]
        from_scratch: bool,
    },

    /// Train the ordering weights on pairwise hinge targets.
    TrainPairwise {
        #[arg(long)]
        games: PathBuf,

        #[arg(long, default_value = "search_weights.txt")]
        out: PathBuf,

        #[arg(long)]
        from_scratch: bool,
    },

    /// Write a labelled feature dataset instead of training.
    Dataset {
        #[arg(long)]
        games: PathBuf,

        #[arg(long, default_value = "search_param_dataset.csv")]
        out: PathBuf,
    },

    /// Record histograms of shallow search gain over the static evaluation.
    Histogram {
        #[arg(long)]
        games: PathBuf,

        /// 0: root gain; 1: per-quiet-child gain; 2: best quiet vs best forcing child.
        #[arg(long, default_value_t = 0)]
        focus: u32,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print quantiles of the evaluation swing of corpus captures.
    CaptureValues {
        #[arg(long)]
        games: PathBuf,

        /// Number of quantiles to print.
        #[arg(short, default_value_t = 10)]
        n: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let weights = match &cli.weights {
        Some(path) => Weights::load(path)?,
        None => Weights::default(),
    };
    let mut searcher = Searcher::with_weights(weights);

    match cli.command {
        Command::Search {
            fen,
            depth,
            movetime,
        } => {
            let board = parse_board(&fen)?;
            let best = match (depth, movetime) {
                (Some(depth), _) => searcher.depth_search(&board, depth),
                (None, Some(ms)) => searcher.time_search(&board, Duration::from_millis(ms)),
                (None, None) => searcher.depth_search(&board, 8),
            };
            let response = UciResponse::<String>::BestMove {
                bestmove: Some(move_to_uci(best)),
                ponder: None,
            };
            println!("{response}");
        }

        Command::Perft { depth, fen } => {
            let mut board = parse_board(&fen)?;
            for depth in 1..=depth {
                println!("perft({depth}) = {}", perft(&mut board, depth));
            }
        }

        Command::Eval { fen } => {
            println!("{}", Evaluator::score_board(&parse_board(&fen)?));
        }

        Command::TrainOrder {
            games,
            out,
            from_scratch,
        } => {
            let (stop, _pool) = input_stop_flag();
            train::train_order_based(
                &mut searcher,
                &games,
                &out,
                &description_path(&out),
                from_scratch,
                &stop,
            )?;
        }

        Command::TrainValue {
            games,
            out,
            from_scratch,
        } => {
            let (stop, _pool) = input_stop_flag();
            train::train_value_based(
                &mut searcher,
                &games,
                &out,
                &description_path(&out),
                from_scratch,
                &stop,
            )?;
        }

        Command::TrainPairwise {
            games,
            out,
            from_scratch,
        } => {
            let (stop, _pool) = input_stop_flag();
            train::train_pairwise(
                &mut searcher,
                &games,
                &out,
                &description_path(&out),
                from_scratch,
                &stop,
            )?;
        }

        Command::Dataset { games, out } => {
            let (stop, _pool) = input_stop_flag();
            train::create_search_param_dataset(&mut searcher, &games, &out, &stop)?;
        }

        Command::Histogram {
            games,
            focus,
            out_dir,
        } => {
            let (stop, _pool) = input_stop_flag();
            train::evaluate_score_distributions(&mut searcher, &games, &out_dir, focus, &stop)?;
        }

        Command::CaptureValues { games, n } => {
            train::evaluate_capture_move_value(&games, n)?;
        }
    }
    Ok(())
}

fn parse_board(fen: &Option<String>) -> Result<Board> {
    match fen {
        Some(fen) => fen.parse(),
        None => Ok(Board::startpos()),
    }
}

/// Sibling path for the annotated weight file.
fn description_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("search_weights");
    out.with_file_name(format!("{stem}_description.txt"))
}

/// Spawn a thread that raises the returned flag when `stop` or `quit` is read
/// on stdin (or stdin closes), so the open-ended training loops can be ended
/// cleanly from the terminal.
fn input_stop_flag() -> (Arc<AtomicBool>, ThreadPool) {
    let stop = Arc::new(AtomicBool::new(false));
    let pool = ThreadPool::with_name("input thread".into(), 1);
    let flag = Arc::clone(&stop);
    pool.execute(move || {
        let mut buffer = String::with_capacity(64);
        loop {
            buffer.clear();
            match io::stdin().read_line(&mut buffer) {
                Ok(0) | Err(_) => {
                    flag.store(true, Ordering::Relaxed);
                    return;
                }
                Ok(_) => {
                    let command = buffer.trim();
                    if command == "stop" || command == "quit" {
                        flag.store(true, Ordering::Relaxed);
                        return;
                    }
                }
            }
        }
    });
    (stop, pool)
}
