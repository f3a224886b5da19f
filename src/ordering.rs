/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Move ordering.
//!
//! Two policies: a cheap hard-coded priority used in quiescence, and a
//! feature-weighted linear model used in the main search. Both assign a key
//! to every move and perform a single stable descending sort, so ties keep
//! their generation order.

use arrayvec::ArrayVec;
use chess::{BitBoard, Piece, EMPTY};

use crate::{
    features::{idx, square_bucket, FeatureVector, Weights, NUM_FEATURES},
    Board, KillerTable, Move, MoveKind,
};

/// Upper bound on the number of legal moves in any position.
const MAX_MOVES: usize = 256;

/// Receives the indices of the features present on a move.
///
/// Scoring a move and extracting its feature vector share one walk over the
/// catalogue; the sink decides whether an index becomes a weight contribution
/// or a vector entry.
pub trait FeatureSink {
    fn add(&mut self, index: usize);
}

impl FeatureSink for FeatureVector {
    #[inline(always)]
    fn add(&mut self, index: usize) {
        self.0[index] = 1;
    }
}

/// Sink that accumulates the dot product with the weight vector.
struct WeightSum<'a> {
    weights: &'a Weights,
    total: i32,
}

impl FeatureSink for WeightSum<'_> {
    #[inline(always)]
    fn add(&mut self, index: usize) {
        self.total += self.weights.get(index);
    }
}

/// Per-position inputs shared by every move scored at a node.
pub struct MoveContext {
    last_move: Option<Move>,
    last_move_forcing: bool,
    direct_checks: [BitBoard; 6],
    taboo: [BitBoard; 6],
}

impl MoveContext {
    pub fn new(board: &Board) -> Self {
        Self {
            last_move: board.last_move(),
            last_move_forcing: board
                .last_move_kind()
                .is_some_and(MoveKind::is_forcing),
            direct_checks: board.direct_checking_squares(),
            taboo: board.taboo_squares(),
        }
    }
}

/// Walk the feature catalogue for `mv`, reporting each present feature.
///
/// Hash and killer moves short-circuit to their dedicated feature: nothing
/// else contributes, which the trainers rely on when pinning those weights.
fn add_move_features<S: FeatureSink>(
    sink: &mut S,
    board: &Board,
    killers: &KillerTable,
    ctx: &MoveContext,
    mv: Move,
    hint: Option<Move>,
) {
    if hint == Some(mv) {
        sink.add(idx::HASH_MOVE);
        return;
    }
    if let Some(slot) = killers.slot_of(board.num_made_moves(), mv) {
        sink.add(idx::KILLER + slot);
        return;
    }

    let kind = board.move_kind(mv);
    // Safe unwrap: a legal move always has a piece on its source square.
    let moving = board.piece_kind_at(mv.get_source()).unwrap();
    let target = board.piece_kind_at(mv.get_dest());
    let m = moving.to_index();

    if kind >= MoveKind::Capture && kind != MoveKind::Castle {
        let wins_cheaper = target.is_some_and(|t| t.to_index() >= m);
        if !wins_cheaper && !board.non_negative_see(mv) {
            sink.add(idx::SEE);
        }
    }

    // The target cannot be a king, so an empty target takes the king column.
    let t = target.map_or(5, |t| t.to_index());
    sink.add(idx::PIECE_X_TARGET + m * 6 + t);
    sink.add(idx::MOVE_TYPE + kind as usize);
    sink.add(idx::MOVE_SOURCE + square_bucket(mv.get_source()));
    sink.add(idx::MOVE_DESTINATION + square_bucket(mv.get_dest()));

    if let Some(last) = ctx.last_move {
        if last.get_dest() == mv.get_dest() {
            sink.add(idx::CAPTURE_LAST_MOVED);
        }
    }

    let dest = BitBoard::from_square(mv.get_dest());
    if ctx.direct_checks[m] & dest != EMPTY {
        sink.add(idx::GIVES_CHECK);
        if kind < MoveKind::EnPassant && !board.non_negative_see(mv) {
            sink.add(idx::SEE + 1);
        }
    } else if kind == MoveKind::Quiet && ctx.taboo[m] & dest != EMPTY {
        sink.add(idx::TABOO_DESTINATION);
    }

    let forcing = kind.is_forcing() as usize;
    sink.add(idx::FORCING + forcing + 2 * ctx.last_move_forcing as usize);
}

/// The linear-model ordering score of `mv`.
pub fn ml_score(
    board: &Board,
    killers: &KillerTable,
    weights: &Weights,
    ctx: &MoveContext,
    mv: Move,
    hint: Option<Move>,
) -> i32 {
    let mut sum = WeightSum { weights, total: 0 };
    add_move_features(&mut sum, board, killers, ctx, mv, hint);
    sum.total
}

/// The feature vector of `mv`, used by the trainers.
pub fn move_features(
    board: &Board,
    killers: &KillerTable,
    ctx: &MoveContext,
    mv: Move,
    hint: Option<Move>,
) -> FeatureVector {
    let mut vector = FeatureVector([0; NUM_FEATURES]);
    add_move_features(&mut vector, board, killers, ctx, mv, hint);
    vector
}

/// Sort `moves` by the learned model, best first.
///
/// A pure function of (position, moves, hint, weights): the sort is stable
/// and the key is derived from nothing else.
pub fn sort_moves_ml(
    moves: &mut [Move],
    board: &Board,
    killers: &KillerTable,
    weights: &Weights,
    hint: Option<Move>,
) {
    let ctx = MoveContext::new(board);
    sort_by_key_desc(moves, |mv| {
        let score = ml_score(board, killers, weights, &ctx, mv, hint);
        (10_000 + score).clamp(0, u16::MAX as i32)
    });
}

/// Sort `moves` by the hard-coded heuristic, best first.
pub fn sort_moves(
    moves: &mut [Move],
    board: &Board,
    killers: &KillerTable,
    best: Option<Move>,
    quiescent: bool,
) {
    sort_by_key_desc(moves, |mv| {
        move_priority(board, killers, mv, best, quiescent)
    });
}

/// The heuristic priority of `mv`.
fn move_priority(
    board: &Board,
    killers: &KillerTable,
    mv: Move,
    best: Option<Move>,
    quiescent: bool,
) -> i32 {
    if best == Some(mv) {
        return 20_000;
    }
    let kind = board.move_kind(mv);
    if kind > MoveKind::Capture {
        return 11_000;
    }
    if kind == MoveKind::Capture {
        // Safe unwraps: a capture has pieces on both of its squares.
        let victim = board.piece_kind_at(mv.get_dest()).unwrap();
        let attacker = board.piece_kind_at(mv.get_source()).unwrap();
        return 1_000 + 10 * piece_rank(victim) - piece_rank(attacker);
    }
    if quiescent {
        return 10;
    }
    match killers.slot_of(board.num_made_moves(), mv) {
        Some(0) => 1_001,
        Some(_) => 1_000,
        None => 10,
    }
}

/// Piece kinds numbered with the pawn smallest and the king largest.
#[inline(always)]
fn piece_rank(piece: Piece) -> i32 {
    piece.to_index() as i32 + 1
}

/// Stable descending sort of `moves` by `key`, computed once per move.
fn sort_by_key_desc(moves: &mut [Move], key: impl Fn(Move) -> i32) {
    let mut keyed: ArrayVec<(i32, Move), MAX_MOVES> =
        moves.iter().map(|&mv| (key(mv), mv)).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    for (slot, (_, mv)) in moves.iter_mut().zip(keyed) {
        *slot = mv;
    }
}

/// Swap `mv` to the front of `moves` if present, returning whether it was found.
pub fn swap_to_front(moves: &mut [Move], mv: Move) -> bool {
    if let Some(position) = moves.iter().position(|&m| m == mv) {
        moves.swap(0, position);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::GAUGE_FEATURES;

    fn kiwipete() -> Board {
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap()
    }

    #[test]
    fn hash_move_sorts_first() {
        let board = kiwipete();
        let killers = KillerTable::default();
        let weights = Weights::default();
        let mut moves = board.moves();
        let hint = moves[moves.len() - 1];

        sort_moves_ml(&mut moves, &board, &killers, &weights, Some(hint));
        assert_eq!(moves[0], hint);

        let mut quiescence = board.moves();
        sort_moves(&mut quiescence, &board, &killers, Some(hint), true);
        assert_eq!(quiescence[0], hint);
    }

    #[test]
    fn ml_sort_is_deterministic() {
        let board = kiwipete();
        let killers = KillerTable::default();
        let weights = Weights::default();

        let mut first = board.moves();
        sort_moves_ml(&mut first, &board, &killers, &weights, None);
        let mut second = board.moves();
        sort_moves_ml(&mut second, &board, &killers, &weights, None);
        assert_eq!(first, second);
    }

    #[test]
    fn hash_and_killer_features_short_circuit() {
        let board = kiwipete();
        let mut killers = KillerTable::default();
        let ctx = MoveContext::new(&board);
        let moves = board.moves();
        let weights = Weights::default();

        let hint = moves[0];
        let vector = move_features(&board, &killers, &ctx, hint, Some(hint));
        assert_eq!(vector.0.iter().sum::<i32>(), 1);
        assert_eq!(vector.0[idx::HASH_MOVE], 1);
        assert_eq!(
            ml_score(&board, &killers, &weights, &ctx, hint, Some(hint)),
            weights.get(idx::HASH_MOVE)
        );

        let quiet = *moves
            .iter()
            .find(|&&mv| board.move_kind(mv) == MoveKind::Quiet)
            .unwrap();
        killers.store(board.num_made_moves(), quiet);
        let vector = move_features(&board, &killers, &ctx, quiet, None);
        assert_eq!(vector.0.iter().sum::<i32>(), 1);
        assert_eq!(vector.0[idx::KILLER], 1);
    }

    #[test]
    fn ordinary_moves_have_dense_block_features() {
        let board = Board::startpos();
        let killers = KillerTable::default();
        let ctx = MoveContext::new(&board);
        let mv = board.parse_move("e2e4").unwrap();

        let vector = move_features(&board, &killers, &ctx, mv, None);
        assert_eq!(vector.0[idx::MOVE_TYPE + MoveKind::DoublePawnPush as usize], 1);
        assert_eq!(vector.0[idx::PIECE_X_TARGET + 5], 1, "pawn x empty target");
        assert_eq!(vector.0[idx::FORCING], 1, "quiet move after no last move");
    }

    #[test]
    fn capture_priorities_rank_victims_over_attackers() {
        let board = kiwipete();
        let killers = KillerTable::default();
        let mut moves = board.moves();
        sort_moves(&mut moves, &board, &killers, None, true);

        // Promotion-free position: the best captures come first and every
        // capture outranks every quiet move.
        let first_quiet = moves
            .iter()
            .position(|&mv| board.move_kind(mv) < MoveKind::Capture)
            .unwrap();
        assert!(moves[..first_quiet]
            .iter()
            .all(|&mv| board.move_kind(mv) >= MoveKind::Capture));
    }

    #[test]
    fn gauge_features_are_reachable() {
        // A quiet king move into the corner from the start bucket exercises
        // the gauge reference situation.
        let board: Board = "4k3/8/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        let killers = KillerTable::default();
        let ctx = MoveContext::new(&board);
        let mv = board.parse_move("a1b1").unwrap();
        let vector = move_features(&board, &killers, &ctx, mv, None);
        assert_eq!(vector.0[GAUGE_FEATURES[1]], 1, "king x none bigram");
        assert_eq!(vector.0[GAUGE_FEATURES[2]], 1, "corner source bucket");
    }
}
