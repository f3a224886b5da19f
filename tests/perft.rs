/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use marten::{perft, Board};

fn test_perft_fen_nodes(depth: i32, fen: &str, expected: u64) {
    let mut board: Board = fen.parse().unwrap();
    let nodes = perft(&mut board, depth);
    assert_eq!(nodes, expected, "PERFT({depth}) failed on {fen}");
}

/// https://www.chessprogramming.org/Perft_Results
#[test]
fn perft_startpos() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    test_perft_fen_nodes(1, fen, 20);
    test_perft_fen_nodes(2, fen, 400);
    test_perft_fen_nodes(3, fen, 8_902);
    test_perft_fen_nodes(4, fen, 197_281);
    test_perft_fen_nodes(5, fen, 4_865_609);
}

#[test]
fn perft_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    test_perft_fen_nodes(1, fen, 48);
    test_perft_fen_nodes(2, fen, 2_039);
    test_perft_fen_nodes(3, fen, 97_862);
    test_perft_fen_nodes(4, fen, 4_085_603);
}

#[test]
fn perft_endgame() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    test_perft_fen_nodes(1, fen, 14);
    test_perft_fen_nodes(2, fen, 191);
    test_perft_fen_nodes(3, fen, 2_812);
    test_perft_fen_nodes(4, fen, 43_238);
    test_perft_fen_nodes(5, fen, 674_624);
}

#[test]
fn perft_promotions() {
    let fen = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";
    test_perft_fen_nodes(1, fen, 24);
    test_perft_fen_nodes(2, fen, 496);
    test_perft_fen_nodes(3, fen, 9_483);
    test_perft_fen_nodes(4, fen, 182_838);
}

#[test]
fn perft_castling_and_pins() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    test_perft_fen_nodes(1, fen, 6);
    test_perft_fen_nodes(2, fen, 264);
    test_perft_fen_nodes(3, fen, 9_467);
    test_perft_fen_nodes(4, fen, 422_333);
}
