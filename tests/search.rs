/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use marten::{move_to_uci, Board, Score, Searcher};

fn run_depth_search(fen: &str, depth: i32) -> (Searcher, Board, String) {
    let board: Board = fen.parse().unwrap();
    let mut searcher = Searcher::new();
    searcher.set_print_info(false);
    let best = searcher.depth_search(&board, depth);
    (searcher, board, move_to_uci(best))
}

#[test]
fn depth_search_returns_a_legal_move() {
    let board = Board::startpos();
    let mut searcher = Searcher::new();
    searcher.set_print_info(false);
    let best = searcher.depth_search(&board, 5);
    assert!(board.moves().contains(&best));
    assert!(!searcher.last_search_score().is_mate());
}

#[test]
fn time_search_returns_quickly_with_a_legal_move() {
    let board = Board::startpos();
    let mut searcher = Searcher::new();
    searcher.set_print_info(false);

    let start = std::time::Instant::now();
    let best = searcher.time_search(&board, Duration::from_millis(10));
    assert!(board.moves().contains(&best));
    // The deadline is sampled at node returns, so allow generous slack.
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn finds_back_rank_mate() {
    let (searcher, _, best) = run_depth_search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
    assert_eq!(best, "a1a8");
    assert!(searcher.last_search_score().is_mate());
    assert!(searcher.last_search_score() > Score::DRAW);
}

#[test]
fn prefers_winning_the_hanging_queen() {
    let (_, _, best) = run_depth_search("5k2/8/8/3q4/8/8/3R4/3K4 w - - 0 1", 4);
    assert_eq!(best, "d2d5");
}

#[test]
fn avoids_stalemating_when_winning() {
    // With K+Q against a cornered king, the search must not throw away the
    // win by stalemate inside its horizon.
    let (searcher, board, best) = run_depth_search("k7/8/2K5/8/8/8/8/1Q6 w - - 0 1", 5);
    let mut board = board.clone();
    let mv = board.parse_move(&best).unwrap();
    board.make(mv);
    assert!(
        board.in_check() || !board.moves().is_empty(),
        "{best} stalemates immediately"
    );
    assert!(searcher.last_search_score() >= Score::DRAW);
}

#[test]
fn deeper_search_from_same_searcher_reuses_the_table() {
    let board: Board = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        .parse()
        .unwrap();
    let mut searcher = Searcher::new();
    searcher.set_print_info(false);

    searcher.depth_search(&board, 4);
    let first_nodes = searcher.nodes();
    // Re-running the same search over a warm table visits fewer nodes.
    searcher.depth_search(&board, 4);
    assert!(searcher.nodes() <= first_nodes);
}
