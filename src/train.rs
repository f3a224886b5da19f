/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Training loops for the move-ordering weights.
//!
//! All of the loops share one sampling scheme: clear the killer and
//! transposition tables, pick a random node-count threshold and a random game
//! position, then run a short deadline-bounded search that stops at the
//! threshold's null-window node and captures it. The captured position is
//! re-searched move by move to produce regression targets.
//!
//! Each loop runs until its stop flag is raised, writing the weights (or the
//! dataset) periodically.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    features::{idx, FeatureVector, Weights, GAUGE_FEATURES, NUM_FEATURES},
    ordering::{move_features, sort_moves_ml, MoveContext},
    search::{NodeKind, SampledNode},
    Board, Evaluator, Move, MoveKind, Score, Searcher,
};

/// Scale divisor applied to the linear score before the logistic.
const SCALING: f64 = 128.0;

/// A game from the training corpus: its moves in coordinate notation, played
/// from the standard starting position.
#[derive(Clone, Debug)]
pub struct TrainingGame {
    moves: Vec<String>,
}

impl TrainingGame {
    #[inline(always)]
    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// The position after the first `n` moves of the game.
    pub fn position_after(&self, n: usize) -> Result<Board> {
        let mut board = Board::startpos();
        for mv in &self.moves[..n.min(self.moves.len())] {
            let mv = board.parse_move(mv)?;
            board.make(mv);
        }
        Ok(board)
    }

    /// A uniformly random position of the game.
    fn random_position(&self, rng: &mut StdRng) -> Option<Board> {
        let n = rng.gen_range(0..self.moves.len().max(1));
        self.position_after(n).ok()
    }

    /// A random position from the last third of a long enough game.
    fn late_position(&self, rng: &mut StdRng) -> Option<Board> {
        let len = self.moves.len();
        if len < 25 {
            return None;
        }
        let n = (2 * len / 3 + rng.gen_range(0..len / 3)).saturating_sub(2);
        self.position_after(n).ok()
    }

    /// A random position from the last two thirds of a long enough game.
    fn middle_position(&self, rng: &mut StdRng) -> Option<Board> {
        let len = self.moves.len();
        if len < 25 {
            return None;
        }
        let n = (len / 3 + rng.gen_range(0..2 * len / 3)).saturating_sub(2);
        self.position_after(n).ok()
    }
}

/// Load a corpus of games: one game per line, whitespace-separated moves in
/// coordinate notation. Blank lines and `#` comments are skipped.
pub fn load_games(path: &Path) -> Result<Vec<TrainingGame>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading game corpus from {}", path.display()))?;
    let games: Vec<TrainingGame> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| TrainingGame {
            moves: line.split_whitespace().map(str::to_owned).collect(),
        })
        .collect();
    ensure!(!games.is_empty(), "{}: corpus holds no games", path.display());
    Ok(games)
}

/// Write rows of values as comma-separated lines.
fn save_rows_csv<T: Display>(rows: &[Vec<T>], path: &Path) -> Result<()> {
    let mut out = String::new();
    for row in rows {
        let mut first = true;
        for value in row {
            if !first {
                out.push(',');
            }
            out.push_str(&value.to_string());
            first = false;
        }
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}

/// One sampling attempt: reset tables, randomise the threshold, pick a game
/// position and run the instrumented search. `None` means retry.
fn draw_sample(
    searcher: &mut Searcher,
    games: &[TrainingGame],
    rng: &mut StdRng,
    threshold: std::ops::Range<u64>,
    deadline: Duration,
    position: impl Fn(&TrainingGame, &mut StdRng) -> Option<Board>,
) -> Option<SampledNode> {
    searcher.killers.clear();
    searcher.tt.clear();
    searcher.set_sample_threshold(rng.gen_range(threshold));
    let game = games.choose(rng)?;
    let board = position(game, rng)?;
    let sample = searcher.sample_search(board, deadline);
    searcher.set_infinite_deadline();
    sample
}

/// Shuffle, model-sort and feature-extract the legal moves of a sampled
/// position. The shuffle in front of the stable sort varies the order of
/// equally scored moves between samples.
fn prepare_moves(
    searcher: &Searcher,
    board: &Board,
    rng: &mut StdRng,
    hint: Option<Move>,
) -> (Vec<Move>, Vec<FeatureVector>) {
    let mut moves = board.moves();
    moves.shuffle(rng);
    sort_moves_ml(&mut moves, board, &searcher.killers, &searcher.weights, hint);
    let ctx = MoveContext::new(board);
    let features = moves
        .iter()
        .map(|&mv| move_features(board, &searcher.killers, &ctx, mv, hint))
        .collect();
    (moves, features)
}

/// Starting weights for a trainer: zeros from scratch, otherwise the weight file.
fn initial_weights(weights_path: &Path, from_scratch: bool) -> Result<[f64; NUM_FEATURES]> {
    let mut weights = [0f64; NUM_FEATURES];
    if !from_scratch {
        let loaded = Weights::load(weights_path)?;
        for (w, &v) in weights.iter_mut().zip(loaded.values()) {
            *w = v as f64;
        }
    }
    Ok(weights)
}

/// Round the training weights into the searcher and persist both weight files.
fn commit_weights(
    searcher: &mut Searcher,
    weights: &[f64; NUM_FEATURES],
    weights_path: &Path,
    descriptions_path: &Path,
) -> Result<()> {
    let mut rounded = [0i32; NUM_FEATURES];
    for (r, w) in rounded.iter_mut().zip(weights) {
        *r = w.round() as i32;
    }
    searcher.weights = Weights::from_values(rounded);
    searcher.weights.save(weights_path, descriptions_path)
}

#[inline(always)]
fn logistic(linear: f64) -> f64 {
    1.0 / (1.0 + (-linear / SCALING).exp())
}

/// Pointwise order-based training.
///
/// Walks the sampled position's moves in model order, searching each with the
/// running window; a move is a positive example iff it raises alpha, and
/// alpha then tightens to one below its score so later siblings only count
/// when they beat it.
pub fn train_order_based(
    searcher: &mut Searcher,
    games_path: &Path,
    weights_path: &Path,
    descriptions_path: &Path,
    from_scratch: bool,
    stop: &AtomicBool,
) -> Result<()> {
    searcher.set_print_info(false);
    let mut weights = initial_weights(weights_path, from_scratch)?;
    // High clean hardcoded value for the hash move.
    weights[idx::HASH_MOVE] = 2000.0;
    let games = load_games(games_path)?;
    let mut rng = StdRng::from_entropy();

    let mut nu = 8.0;
    let mut sampled_positions: u64 = 0;
    let mut sampled_depths = [0u64; 3];

    while !stop.load(Ordering::Relaxed) {
        let Some(sample) = draw_sample(
            searcher,
            &games,
            &mut rng,
            300..500,
            Duration::from_millis(100),
            TrainingGame::random_position,
        ) else {
            continue;
        };
        let mut board = sample.board;
        let (moves, features) = prepare_moves(searcher, &board, &mut rng, None);

        let mut alpha = sample.alpha - 1;
        let beta = Score::MAX;
        sampled_positions += 1;
        sampled_depths[(sample.depth - 1) as usize] += 1;

        for (i, &mv) in moves.iter().enumerate() {
            board.make(mv);
            let score =
                -searcher.alpha_beta(NodeKind::Pv, &mut board, -beta, -alpha, sample.depth - 1);
            board.unmake();

            let mut target = 0.0;
            if score > alpha {
                // A score exactly on the window edge says nothing either way.
                if score == alpha + 1 {
                    continue;
                }
                target = 1.0;
                alpha = score - 1;
            }
            let mut linear = 0.0;
            for k in idx::HASH_MOVE + 1..NUM_FEATURES {
                linear += features[i].0[k] as f64 * weights[k];
            }
            let gradient = logistic(linear) - target;
            for k in idx::HASH_MOVE + 1..NUM_FEATURES {
                weights[k] -= nu * gradient * features[i].0[k] as f64;
            }
        }

        if sampled_positions % 10 == 0 {
            for g in GAUGE_FEATURES {
                weights[g] = 0.0;
            }
        }
        if sampled_positions % 1000 == 0 {
            println!("Sampled {sampled_positions} positions!");
            println!("Sampled depths: {sampled_depths:?}");
            commit_weights(searcher, &weights, weights_path, descriptions_path)?;
        }
        if sampled_positions % 50_000 == 0 {
            nu /= 2.0;
            println!("New nu: {nu}");
        }
    }
    commit_weights(searcher, &weights, weights_path, descriptions_path)
}

/// Classify every move of a sampled position with a null-window search at the
/// sampled alpha. Returns the scores plus the counts below and above alpha;
/// stops early once more than half the moves beat alpha.
fn classify_moves(
    searcher: &mut Searcher,
    board: &mut Board,
    moves: &[Move],
    sample: &SampledNode,
) -> (Vec<Score>, usize, usize) {
    let mut scores = vec![Score::DRAW; moves.len()];
    let (mut low, mut high) = (0usize, 0usize);
    for (i, &mv) in moves.iter().enumerate() {
        board.make(mv);
        scores[i] = -searcher.alpha_beta(
            NodeKind::Nw,
            board,
            -(sample.alpha + 1),
            -sample.alpha,
            sample.depth - 1,
        );
        board.unmake();
        if scores[i] > sample.alpha {
            high += 1;
            if high > moves.len() / 2 {
                break;
            }
        } else {
            low += 1;
        }
    }
    (scores, low, high)
}

/// Pointwise value-based training.
///
/// Every move of the sampled position is labelled by whether its null-window
/// score beats the sampled alpha. Positions where nothing beats alpha,
/// everything does, or a majority does teach nothing and are skipped.
pub fn train_value_based(
    searcher: &mut Searcher,
    games_path: &Path,
    weights_path: &Path,
    descriptions_path: &Path,
    from_scratch: bool,
    stop: &AtomicBool,
) -> Result<()> {
    searcher.set_print_info(false);
    let mut weights = initial_weights(weights_path, from_scratch)?;
    weights[idx::HASH_MOVE] = 2000.0;
    // Underpromotions are practically never the best move; pin them out of
    // the way instead of learning them.
    weights[idx::MOVE_TYPE + MoveKind::RookPromotion as usize] = -2000.0;
    weights[idx::MOVE_TYPE + MoveKind::BishopPromotion as usize] = -2000.0;
    let games = load_games(games_path)?;
    let mut rng = StdRng::from_entropy();

    let mut nu = 4.0;
    if !from_scratch {
        nu /= 8.0;
    }
    let mut sampled_positions: u64 = 0;
    let (mut all_above, mut all_below, mut too_easy) = (0u64, 0u64, 0u64);

    while !stop.load(Ordering::Relaxed) {
        let Some(sample) = draw_sample(
            searcher,
            &games,
            &mut rng,
            800..1200,
            Duration::from_millis(150),
            TrainingGame::late_position,
        ) else {
            continue;
        };
        let mut board = sample.board.clone();
        let (moves, features) = prepare_moves(searcher, &board, &mut rng, None);

        let (scores, low, high) = classify_moves(searcher, &mut board, &moves, &sample);
        if high == 0 {
            all_below += 1;
            continue;
        }
        if low == 0 {
            all_above += 1;
            continue;
        }
        if high > low {
            too_easy += 1;
            continue;
        }

        for (i, &mv) in moves.iter().enumerate() {
            let kind = board.move_kind(mv);
            if kind == MoveKind::RookPromotion || kind == MoveKind::BishopPromotion {
                continue;
            }
            let target = (scores[i] > sample.alpha) as i32 as f64;
            let mut linear = 0.0;
            for k in 0..NUM_FEATURES {
                linear += features[i].0[k] as f64 * weights[k];
            }
            let gradient = logistic(linear) - target;
            for k in 0..NUM_FEATURES {
                weights[k] -= nu * gradient * features[i].0[k] as f64;
            }
        }

        sampled_positions += 1;
        if sampled_positions % 10 == 0 {
            for g in GAUGE_FEATURES {
                weights[g] = 0.0;
            }
        }
        if sampled_positions % 1000 == 0 {
            println!("Sampled {sampled_positions} positions!");
            println!(
                "Further {all_above} all cut nodes, {all_below} all nodes and {too_easy} too easy nodes!"
            );
            commit_weights(searcher, &weights, weights_path, descriptions_path)?;
        }
        if sampled_positions % 300_000 == 0 {
            nu /= 2.0;
            println!("New nu: {nu}");
        }
    }
    commit_weights(searcher, &weights, weights_path, descriptions_path)
}

/// Pairwise hinge training.
///
/// Adjacent moves in model order are compared by their full-window scores;
/// whenever the model's margin between a better and a worse move falls short,
/// the weight difference of the pair is pushed apart, weighted down for pairs
/// further along the move order.
pub fn train_pairwise(
    searcher: &mut Searcher,
    games_path: &Path,
    weights_path: &Path,
    descriptions_path: &Path,
    from_scratch: bool,
    stop: &AtomicBool,
) -> Result<()> {
    searcher.set_print_info(false);
    let mut weights = initial_weights(weights_path, from_scratch)?;
    let games = load_games(games_path)?;
    let mut rng = StdRng::from_entropy();

    let mut nu = 0.4;
    let lambda = 1.0 / 1000.0;
    let mut sampled_positions: u64 = 0;
    let mut sampled_depths = [0f64; 3];

    while !stop.load(Ordering::Relaxed) {
        let Some(sample) = draw_sample(
            searcher,
            &games,
            &mut rng,
            300..500,
            Duration::from_millis(100),
            TrainingGame::random_position,
        ) else {
            continue;
        };
        let hash = sample.board.hash();
        let tt_move = searcher
            .tt
            .get(hash)
            .map(|entry| entry.best_move)
            .or_else(|| searcher.tt.get_pv(hash).map(|entry| entry.best_move));

        let mut board = sample.board.clone();
        if board.moves().len() <= 1 {
            continue;
        }
        let (moves, features) = prepare_moves(searcher, &board, &mut rng, tt_move);

        let mut scores = Vec::with_capacity(moves.len());
        for &mv in &moves {
            board.make(mv);
            let score = -searcher.alpha_beta(
                NodeKind::Pv,
                &mut board,
                Score::MIN,
                Score::MAX,
                sample.depth - 1,
            );
            board.unmake();
            scores.push(score);
        }

        sampled_positions += 1;
        sampled_depths[(sample.depth - 1) as usize] += 1.0;
        let sample_importance = sampled_positions as f64 / sampled_depths[(sample.depth - 1) as usize];

        let mut gradients = [0f64; NUM_FEATURES];
        for i in 0..moves.len() - 1 {
            let j = i + 1;
            if scores[i] == scores[j] {
                continue;
            }
            let pair_importance = sample_importance / j as f64;
            let z = if scores[i] >= scores[j] { 1.0 } else { -1.0 };
            let mut r = 0.0;
            for k in 0..NUM_FEATURES {
                r += weights[k] * (features[i].0[k] - features[j].0[k]) as f64;
            }
            if z * r < 1000.0 {
                for k in 0..NUM_FEATURES {
                    gradients[k] += z * pair_importance * (features[i].0[k] - features[j].0[k]) as f64;
                }
            }
        }
        for k in 0..NUM_FEATURES {
            weights[k] += nu * (gradients[k] - 2.0 * lambda * weights[k]);
        }

        if sampled_positions % 1000 == 0 {
            println!("Sampled {sampled_positions} positions!");
            commit_weights(searcher, &weights, weights_path, descriptions_path)?;
        }
        if sampled_positions % 50_000 == 0 {
            nu /= 2.0;
            println!("New nu: {nu}");
        }
    }
    commit_weights(searcher, &weights, weights_path, descriptions_path)
}

/// Emit a labelled dataset instead of updating weights: one row per sampled
/// position, first column the binary target, the rest the feature vector of
/// one randomly chosen move.
pub fn create_search_param_dataset(
    searcher: &mut Searcher,
    games_path: &Path,
    out_path: &Path,
    stop: &AtomicBool,
) -> Result<()> {
    searcher.set_print_info(false);
    let games = load_games(games_path)?;
    let mut rng = StdRng::from_entropy();

    let mut samples: Vec<Vec<i32>> = Vec::new();
    let mut sampled_positions: u64 = 0;
    let (mut all_above, mut all_below, mut too_easy) = (0u64, 0u64, 0u64);

    while samples.len() < 1_000_000 && !stop.load(Ordering::Relaxed) {
        let Some(sample) = draw_sample(
            searcher,
            &games,
            &mut rng,
            1000..1500,
            Duration::from_millis(200),
            TrainingGame::middle_position,
        ) else {
            continue;
        };
        let mut board = sample.board.clone();
        let (moves, features) = prepare_moves(searcher, &board, &mut rng, None);

        let (scores, low, high) = classify_moves(searcher, &mut board, &moves, &sample);
        if high == 0 {
            all_below += 1;
            continue;
        }
        if low == 0 {
            all_above += 1;
            continue;
        }
        if high > low {
            too_easy += 1;
            continue;
        }

        let i = rng.gen_range(0..moves.len());
        let mut row = features[i].0.to_vec();
        // The hash-move column is never set under a null hint; it carries the label.
        row[idx::HASH_MOVE] = (scores[i] > sample.alpha) as i32;
        samples.push(row);

        sampled_positions += 1;
        if sampled_positions % 1000 == 0 {
            println!("Sampled {sampled_positions} positions!");
            println!(
                "Further {all_above} all cut nodes, {all_below} all nodes and {too_easy} too easy nodes!"
            );
            save_rows_csv(&samples, out_path)?;
        }
    }
    save_rows_csv(&samples, out_path)?;
    println!("Finished creating dataset!");
    Ok(())
}

const HIST_MAX_DEPTH: usize = 3;
const N_SCORE_BINS: usize = 160;
const SCORE_BIN_SIZE: i32 = 100;
const N_DIF_BINS: usize = 800;
const DIF_BIN_SIZE: i32 = 16;

#[inline(always)]
fn dif_bin(dif: Score) -> usize {
    let dif = dif.inner() / DIF_BIN_SIZE + N_DIF_BINS as i32 / 2;
    dif.clamp(0, N_DIF_BINS as i32 - 1) as usize
}

/// Sample positions and record 2-D histograms of static evaluation against
/// the gain seen by a shallow search, at depths 1 to 3.
///
/// Focus modes: 0 records the root search improvement over the static
/// evaluation; 1 the per-quiet-child improvement; 2 the best quiet child
/// against the best forcing child, counting how often the quiet one wins.
pub fn evaluate_score_distributions(
    searcher: &mut Searcher,
    games_path: &Path,
    out_dir: &Path,
    focus: u32,
    stop: &AtomicBool,
) -> Result<()> {
    searcher.set_print_info(false);
    let games = load_games(games_path)?;
    let mut rng = StdRng::from_entropy();

    let mut histogram = vec![vec![vec![0i64; N_DIF_BINS]; N_SCORE_BINS]; HIST_MAX_DEPTH];
    let (mut quiet_wins, mut quiet_totals) = (0u64, 0u64);
    let mut id: u64 = 0;

    while !stop.load(Ordering::Relaxed) {
        id += 1;
        let Some(sample) = draw_sample(
            searcher,
            &games,
            &mut rng,
            300..450,
            Duration::from_millis(150),
            TrainingGame::middle_position,
        ) else {
            continue;
        };
        if sample.board.in_check() {
            continue;
        }
        let static_eval = Evaluator::score_board(&sample.board);
        let score_bin = {
            let bin = (static_eval.inner() + SCORE_BIN_SIZE / 2) / SCORE_BIN_SIZE
                + N_SCORE_BINS as i32 / 2;
            bin.clamp(0, N_SCORE_BINS as i32 - 1) as usize
        };

        match focus {
            0 => {
                for depth in 1..=HIST_MAX_DEPTH {
                    searcher.depth_search(&sample.board, depth as i32);
                    let dif = searcher.last_search_score() - static_eval;
                    histogram[depth - 1][score_bin][dif_bin(dif)] += 1;
                }
            }
            1 => {
                let mut board = sample.board.clone();
                let moves = board.moves();
                for depth in 1..=HIST_MAX_DEPTH {
                    for &mv in &moves {
                        if board.move_kind(mv).is_forcing() {
                            continue;
                        }
                        board.make(mv);
                        if board.in_check() || board.moves().is_empty() {
                            board.unmake();
                            continue;
                        }
                        let child_score = if depth == 1 {
                            -searcher.qsearch(&mut board)
                        } else {
                            searcher.depth_search(&board, depth as i32 - 1);
                            -searcher.last_search_score()
                        };
                        board.unmake();
                        histogram[depth - 1][score_bin][dif_bin(child_score - static_eval)] += 1;
                    }
                }
            }
            _ => {
                let mut board = sample.board.clone();
                let moves = board.moves();
                for depth in 1..=HIST_MAX_DEPTH {
                    let mut max_quiet = Score::MIN;
                    let mut max_forcing = Score::MIN;
                    for &mv in &moves {
                        let mut forcing = board.move_kind(mv).is_forcing();
                        board.make(mv);
                        if board.in_check() {
                            forcing = true;
                        }
                        if board.moves().is_empty() {
                            board.unmake();
                            continue;
                        }
                        let child_score = if depth == 1 {
                            -searcher.qsearch(&mut board)
                        } else {
                            searcher.depth_search(&board, depth as i32 - 1);
                            -searcher.last_search_score()
                        };
                        board.unmake();
                        if forcing {
                            max_forcing = max_forcing.max(child_score - static_eval);
                        } else {
                            max_quiet = max_quiet.max(child_score - static_eval);
                        }
                    }
                    if max_quiet > max_forcing {
                        quiet_wins += 1;
                        histogram[depth - 1][score_bin][dif_bin(max_quiet)] += 1;
                    }
                    quiet_totals += 1;
                }
            }
        }

        if id % 1000 == 0 {
            println!("Evaluated {id} positions!");
            if focus == 2 {
                println!("Max is quiet in {quiet_wins}/{quiet_totals}");
            }
            for depth in 0..HIST_MAX_DEPTH {
                let mut rows: Vec<Vec<i64>> = Vec::with_capacity(N_SCORE_BINS);
                for (i, counts) in histogram[depth].iter().enumerate() {
                    let mut row = Vec::with_capacity(N_DIF_BINS + 1);
                    row.push((i as i64 - N_SCORE_BINS as i64 / 2) * SCORE_BIN_SIZE as i64);
                    row.extend(counts.iter().copied());
                    rows.push(row);
                }
                let name = match focus {
                    0 => format!("search_gain_hist{}.csv", depth + 1),
                    1 => format!("quiet_child_hist{}.csv", depth + 1),
                    _ => format!("max_quiet_hist{}.csv", depth + 1),
                };
                save_rows_csv(&rows, &out_dir.join(name))?;
            }
        }
    }
    Ok(())
}

/// Replay the corpus and print, per captured piece kind, quantiles of the
/// evaluation swing of non-checking captures. En-passant captures get their
/// own bucket.
pub fn evaluate_capture_move_value(games_path: &Path, quantiles: usize) -> Result<()> {
    let games = load_games(games_path)?;
    let mut swings: [Vec<i32>; 6] = Default::default();

    for (i, game) in games.iter().enumerate() {
        let mut board = Board::startpos();
        for mv_str in &game.moves {
            let Ok(mv) = board.parse_move(mv_str) else {
                break;
            };
            let kind = board.move_kind(mv);
            if matches!(kind, MoveKind::Capture | MoveKind::EnPassant) && !board.gives_check(mv) {
                let bucket = if kind == MoveKind::EnPassant {
                    5
                } else {
                    // Safe unwrap: a capture has a piece on its destination.
                    board.piece_kind_at(mv.get_dest()).unwrap().to_index()
                };
                let before = Evaluator::score_board(&board).inner();
                board.make(mv);
                let after = -Evaluator::score_board(&board).inner();
                swings[bucket].push(after - before);
            } else {
                board.make(mv);
            }
        }
        if (i + 1) % 10_000 == 0 {
            println!("Evaluated {} games!", i + 1);
        }
    }

    for bucket in &mut swings {
        bucket.sort_unstable();
    }
    for bucket in &swings {
        if bucket.is_empty() {
            println!();
            continue;
        }
        for i in 1..quantiles.max(2) {
            print!("{i}:{} ", bucket[bucket.len() * i / quantiles.max(2)]);
        }
        println!("\n");
    }
    Ok(())
}
