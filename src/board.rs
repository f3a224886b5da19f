/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use anyhow::{anyhow, bail, ensure, Context, Result};
use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard,
    ChessMove, Color, File, MoveGen, Piece, Rank, Square, ALL_PIECES, EMPTY,
};

/// A chess move. Re-exported from the move generator.
pub type Move = ChessMove;

/// Phase contribution of a queen; several pruning techniques are only enabled
/// while more than a queen's worth of material remains.
pub const QUEEN_PHASE: i32 = 4;

/// Classification of a move, ordered by how "loud" it is.
///
/// The ordering is load-bearing: moves with a kind at or below
/// [`MoveKind::DoublePawnPush`] are quiet, kinds at or above
/// [`MoveKind::EnPassant`] are forcing, and only kinds below
/// [`MoveKind::Capture`] may enter the killer table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveKind {
    Quiet = 0,
    DoublePawnPush,
    EnPassant,
    Capture,
    Castle,
    KnightPromotion,
    BishopPromotion,
    RookPromotion,
    QueenPromotion,
}

impl MoveKind {
    /// Whether a move of this kind disturbs the material balance or pawn structure.
    #[inline(always)]
    pub fn is_forcing(self) -> bool {
        self >= Self::EnPassant
    }
}

/// Piece values used by the static exchange evaluator, indexed by [`Piece`].
const SEE_VALUE: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

/// One entry of the undo stack: the state as it was *before* a move was made.
#[derive(Clone, Copy, Debug)]
struct Frame {
    board: chess::Board,
    halfmove: u32,
    mv: Option<Move>,
    kind: Option<MoveKind>,
}

/// The engine's view of a chess position.
///
/// Wraps the copy-make board of the `chess` crate with an undo stack and the
/// operations the search needs beyond legal move generation: draw detection,
/// static exchange evaluation, direct-checking and taboo bitboards, game
/// phase, and move classification.
#[derive(Clone, Debug)]
pub struct Board {
    inner: chess::Board,
    halfmove: u32,
    stack: Vec<Frame>,
}

impl Board {
    /// The standard starting position.
    #[inline(always)]
    pub fn startpos() -> Self {
        Self {
            inner: chess::Board::default(),
            halfmove: 0,
            stack: Vec::new(),
        }
    }

    /// The wrapped `chess` crate board.
    #[inline(always)]
    pub(crate) fn inner(&self) -> &chess::Board {
        &self.inner
    }

    /// Zobrist hash of the current position.
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.inner.get_hash()
    }

    /// The side to move.
    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    /// Number of moves made on this board since its construction position.
    ///
    /// Mate scores and the killer table are anchored to this count.
    #[inline(always)]
    pub fn num_made_moves(&self) -> usize {
        self.stack.len()
    }

    /// The most recently made move, if any (`None` after a null move).
    #[inline(always)]
    pub fn last_move(&self) -> Option<Move> {
        self.stack.last().and_then(|frame| frame.mv)
    }

    /// The kind of the most recently made move, if any.
    #[inline(always)]
    pub fn last_move_kind(&self) -> Option<MoveKind> {
        self.stack.last().and_then(|frame| frame.kind)
    }

    /// Halfmove clock (plies since the last capture or pawn move).
    #[inline(always)]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove
    }

    /// The piece on `square`, if any, ignoring its color.
    #[inline(always)]
    pub fn piece_kind_at(&self, square: Square) -> Option<Piece> {
        self.inner.piece_on(square)
    }

    /// Whether the side to move is in check.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        *self.inner.checkers() != EMPTY
    }

    /// Whether making `mv` leaves the opponent in check.
    ///
    /// Exact: includes discovered checks, unlike the direct-check bitboards.
    #[inline(always)]
    pub fn gives_check(&self, mv: Move) -> bool {
        *self.inner.make_move_new(mv).checkers() != EMPTY
    }

    /// All legal moves in the current position, in generation order.
    #[inline(always)]
    pub fn moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.inner).collect()
    }

    /// The moves considered by quiescence search: all evasions while in
    /// check, otherwise captures and promotions.
    pub fn quiescent_moves(&self) -> Vec<Move> {
        if self.in_check() {
            return self.moves();
        }
        MoveGen::new_legal(&self.inner)
            .filter(|&mv| {
                self.inner.piece_on(mv.get_dest()).is_some()
                    || mv.get_promotion().is_some()
                    || self.is_en_passant(mv)
            })
            .collect()
    }

    /// Make `mv`, pushing the current state onto the undo stack.
    pub fn make(&mut self, mv: Move) {
        let kind = self.move_kind(mv);
        self.stack.push(Frame {
            board: self.inner,
            halfmove: self.halfmove,
            mv: Some(mv),
            kind: Some(kind),
        });
        let irreversible = self.inner.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || kind == MoveKind::Capture;
        self.halfmove = if irreversible { 0 } else { self.halfmove + 1 };
        self.inner = self.inner.make_move_new(mv);
    }

    /// Make a null move (forfeit the turn). Must not be called while in check.
    pub fn make_null(&mut self) {
        let next = self.inner.null_move().expect("null move made while in check");
        self.stack.push(Frame {
            board: self.inner,
            halfmove: self.halfmove,
            mv: None,
            kind: None,
        });
        self.halfmove += 1;
        self.inner = next;
    }

    /// Undo the most recent [`Self::make`] or [`Self::make_null`].
    pub fn unmake(&mut self) {
        let frame = self.stack.pop().expect("unmake with no move made");
        self.inner = frame.board;
        self.halfmove = frame.halfmove;
    }

    /// Whether the current position is drawn by repetition, the fifty-move
    /// rule, or insufficient material.
    pub fn is_draw(&self) -> bool {
        if self.halfmove >= 100 {
            return true;
        }
        if self.is_repetition() {
            return true;
        }
        self.has_insufficient_material()
    }

    fn is_repetition(&self) -> bool {
        let hash = self.inner.get_hash();
        self.stack
            .iter()
            .rev()
            .take(self.halfmove as usize)
            .any(|frame| frame.board.get_hash() == hash)
    }

    fn has_insufficient_material(&self) -> bool {
        let b = &self.inner;
        b.combined().popcnt() <= 3
            && (*b.pieces(Piece::Pawn) | *b.pieces(Piece::Rook) | *b.pieces(Piece::Queen)) == EMPTY
    }

    /// Classify `mv` in the context of the current position.
    pub fn move_kind(&self, mv: Move) -> MoveKind {
        if let Some(promotion) = mv.get_promotion() {
            return match promotion {
                Piece::Knight => MoveKind::KnightPromotion,
                Piece::Bishop => MoveKind::BishopPromotion,
                Piece::Rook => MoveKind::RookPromotion,
                _ => MoveKind::QueenPromotion,
            };
        }
        // Safe unwrap: a legal move always has a piece on its source square.
        let piece = self.inner.piece_on(mv.get_source()).unwrap();
        let captures = self.inner.piece_on(mv.get_dest()).is_some();
        match piece {
            Piece::King if file_distance(mv) >= 2 => MoveKind::Castle,
            Piece::Pawn if self.is_en_passant(mv) => MoveKind::EnPassant,
            Piece::Pawn if rank_distance(mv) == 2 => MoveKind::DoublePawnPush,
            _ if captures => MoveKind::Capture,
            _ => MoveKind::Quiet,
        }
    }

    fn is_en_passant(&self, mv: Move) -> bool {
        self.inner.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && file_distance(mv) == 1
            && self.inner.piece_on(mv.get_dest()).is_none()
    }

    /// Game phase: minors count one, rooks two, queens four, for both sides.
    pub fn phase(&self) -> i32 {
        let b = &self.inner;
        let minors = (*b.pieces(Piece::Knight) | *b.pieces(Piece::Bishop)).popcnt() as i32;
        let rooks = b.pieces(Piece::Rook).popcnt() as i32;
        let queens = b.pieces(Piece::Queen).popcnt() as i32;
        minors + 2 * rooks + 4 * queens
    }

    /// For each piece kind of the side to move, the destination squares from
    /// which that piece would give a direct check to the enemy king.
    ///
    /// Discovered checks are not covered; [`Self::gives_check`] is exact.
    pub fn direct_checking_squares(&self) -> [BitBoard; 6] {
        let them = !self.inner.side_to_move();
        let king = self.inner.king_square(them);
        let occupied = *self.inner.combined();
        let diagonal = get_bishop_moves(king, occupied);
        let orthogonal = get_rook_moves(king, occupied);
        [
            get_pawn_attacks(king, them, !EMPTY),
            get_knight_moves(king),
            diagonal,
            orthogonal,
            diagonal | orthogonal,
            EMPTY,
        ]
    }

    /// For each piece kind of the side to move, the destination squares
    /// attacked by a cheaper enemy piece. Landing there usually loses material.
    pub fn taboo_squares(&self) -> [BitBoard; 6] {
        let b = &self.inner;
        let them = !b.side_to_move();
        let their_pieces = *b.color_combined(them);
        let occupied = *b.combined();

        let mut pawn_attacks = EMPTY;
        for sq in *b.pieces(Piece::Pawn) & their_pieces {
            pawn_attacks |= get_pawn_attacks(sq, them, !EMPTY);
        }
        let mut minor_attacks = EMPTY;
        for sq in *b.pieces(Piece::Knight) & their_pieces {
            minor_attacks |= get_knight_moves(sq);
        }
        for sq in *b.pieces(Piece::Bishop) & their_pieces {
            minor_attacks |= get_bishop_moves(sq, occupied);
        }
        let mut rook_attacks = EMPTY;
        for sq in *b.pieces(Piece::Rook) & their_pieces {
            rook_attacks |= get_rook_moves(sq, occupied);
        }
        let mut queen_attacks = EMPTY;
        for sq in *b.pieces(Piece::Queen) & their_pieces {
            queen_attacks |= get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        }
        let king_attacks = get_king_moves(b.king_square(them));

        let by_minor = pawn_attacks | minor_attacks;
        let by_rook = by_minor | rook_attacks;
        let all = by_rook | queen_attacks | king_attacks;
        [EMPTY, pawn_attacks, pawn_attacks, by_minor, by_rook, all]
    }

    /// Static exchange evaluation of `mv`: the material outcome of the best
    /// capture sequence on the destination square, assuming both sides always
    /// recapture with their least valuable attacker and may stop at any point.
    pub fn see(&self, mv: Move) -> i32 {
        let b = &self.inner;
        let src = mv.get_source();
        let dst = mv.get_dest();
        let mut occupied = *b.combined();

        // Safe unwrap: a legal move always has a piece on its source square.
        let attacker = b.piece_on(src).unwrap();
        let en_passant = self.is_en_passant(mv);
        let victim_value = if en_passant {
            SEE_VALUE[Piece::Pawn.to_index()]
        } else {
            b.piece_on(dst).map_or(0, |p| SEE_VALUE[p.to_index()])
        };
        // After the initial capture the piece on dst is the mover, or for a
        // promotion, the piece it became.
        let mut next_victim = match mv.get_promotion() {
            Some(p) => SEE_VALUE[p.to_index()],
            None => SEE_VALUE[attacker.to_index()],
        };

        occupied &= !BitBoard::from_square(src);
        if en_passant {
            occupied &= !BitBoard::from_square(en_passant_victim(dst, b.side_to_move()));
        }

        let rooks_queens = *b.pieces(Piece::Rook) | *b.pieces(Piece::Queen);
        let bishops_queens = *b.pieces(Piece::Bishop) | *b.pieces(Piece::Queen);

        let mut gain = [0i32; 32];
        let mut depth = 0usize;
        gain[0] = victim_value;

        let mut side = !b.side_to_move();
        let mut attackers = self.attackers_of(dst, occupied) & occupied;

        loop {
            let candidates = attackers & *b.color_combined(side);
            let Some((sq, kind)) = self.least_valuable(candidates) else {
                break;
            };
            depth += 1;
            if depth >= gain.len() {
                break;
            }
            gain[depth] = next_victim - gain[depth - 1];
            next_victim = SEE_VALUE[kind.to_index()];
            occupied &= !BitBoard::from_square(sq);

            // Removing a piece may reveal an x-ray attacker behind it.
            if matches!(kind, Piece::Pawn | Piece::Bishop | Piece::Queen) {
                attackers |= get_bishop_moves(dst, occupied) & bishops_queens;
            }
            if matches!(kind, Piece::Rook | Piece::Queen) {
                attackers |= get_rook_moves(dst, occupied) & rooks_queens;
            }
            attackers &= occupied;
            side = !side;
        }

        while depth > 0 {
            depth -= 1;
            gain[depth] = -((-gain[depth]).max(gain[depth + 1]));
        }
        gain[0]
    }

    /// Whether the exchange started by `mv` does not lose material.
    #[inline(always)]
    pub fn non_negative_see(&self, mv: Move) -> bool {
        self.see(mv) >= 0
    }

    /// All pieces of either color attacking `sq` under the given occupancy.
    fn attackers_of(&self, sq: Square, occupied: BitBoard) -> BitBoard {
        let b = &self.inner;
        let knights = get_knight_moves(sq) & *b.pieces(Piece::Knight);
        let kings = get_king_moves(sq) & *b.pieces(Piece::King);
        let rook_like =
            get_rook_moves(sq, occupied) & (*b.pieces(Piece::Rook) | *b.pieces(Piece::Queen));
        let bishop_like =
            get_bishop_moves(sq, occupied) & (*b.pieces(Piece::Bishop) | *b.pieces(Piece::Queen));
        let white_pawns = get_pawn_attacks(
            sq,
            Color::Black,
            *b.pieces(Piece::Pawn) & *b.color_combined(Color::White),
        );
        let black_pawns = get_pawn_attacks(
            sq,
            Color::White,
            *b.pieces(Piece::Pawn) & *b.color_combined(Color::Black),
        );
        knights | kings | rook_like | bishop_like | white_pawns | black_pawns
    }

    /// Least valuable piece in `set`, iterating piece kinds cheapest first.
    fn least_valuable(&self, set: BitBoard) -> Option<(Square, Piece)> {
        for &kind in ALL_PIECES.iter() {
            let candidates = set & *self.inner.pieces(kind);
            if candidates != EMPTY {
                return Some((candidates.to_square(), kind));
            }
        }
        None
    }

    /// Parse a move in coordinate notation (`e2e4`, `e7e8q`) and validate it
    /// against the legal moves of the current position.
    pub fn parse_move(&self, s: &str) -> Result<Move> {
        ensure!(s.len() == 4 || s.len() == 5, "malformed move {s:?}");
        let bytes = s.as_bytes();
        let src = parse_square(bytes[0], bytes[1]).with_context(|| format!("in move {s:?}"))?;
        let dst = parse_square(bytes[2], bytes[3]).with_context(|| format!("in move {s:?}"))?;
        let promotion = match bytes.get(4) {
            None => None,
            Some(b'n') => Some(Piece::Knight),
            Some(b'b') => Some(Piece::Bishop),
            Some(b'r') => Some(Piece::Rook),
            Some(b'q') => Some(Piece::Queen),
            Some(c) => bail!("unknown promotion piece {:?} in move {s:?}", *c as char),
        };
        MoveGen::new_legal(&self.inner)
            .find(|mv| {
                mv.get_source() == src && mv.get_dest() == dst && mv.get_promotion() == promotion
            })
            .ok_or_else(|| anyhow!("illegal move {s:?}"))
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(fen: &str) -> Result<Self> {
        let inner =
            chess::Board::from_str(fen).map_err(|e| anyhow!("invalid FEN {fen:?}: {e}"))?;
        // The wrapped board does not track the halfmove clock, so read it
        // straight from the FEN.
        let halfmove = fen
            .split_whitespace()
            .nth(4)
            .and_then(|token| token.parse().ok())
            .unwrap_or(0);
        Ok(Self {
            inner,
            halfmove,
            stack: Vec::new(),
        })
    }
}

/// Format a move in coordinate notation (`e2e4`, `e7e8q`).
pub fn move_to_uci(mv: Move) -> String {
    let mut s = format!("{}{}", mv.get_source(), mv.get_dest());
    if let Some(promotion) = mv.get_promotion() {
        s.push(match promotion {
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            _ => 'q',
        });
    }
    s
}

fn parse_square(file: u8, rank: u8) -> Result<Square> {
    ensure!(
        (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank),
        "malformed square {:?}{:?}",
        file as char,
        rank as char
    );
    Ok(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}

fn file_distance(mv: Move) -> usize {
    mv.get_source()
        .get_file()
        .to_index()
        .abs_diff(mv.get_dest().get_file().to_index())
}

fn rank_distance(mv: Move) -> usize {
    mv.get_source()
        .get_rank()
        .to_index()
        .abs_diff(mv.get_dest().get_rank().to_index())
}

/// The square of the pawn removed by an en-passant capture landing on `dst`.
fn en_passant_victim(dst: Square, capturing_side: Color) -> Square {
    let rank = match capturing_side {
        Color::White => dst.get_rank().to_index() - 1,
        Color::Black => dst.get_rank().to_index() + 1,
    };
    Square::make_square(Rank::from_index(rank), dst.get_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let board = Board::startpos();
        assert_eq!(board.moves().len(), 20);
        assert!(!board.in_check());
        assert_eq!(board.num_made_moves(), 0);
    }

    #[test]
    fn make_unmake_round_trip() {
        let mut board = Board::startpos();
        let hash = board.hash();
        let mv = board.parse_move("e2e4").unwrap();
        board.make(mv);
        assert_eq!(board.num_made_moves(), 1);
        assert_eq!(board.last_move(), Some(mv));
        board.unmake();
        assert_eq!(board.hash(), hash);
        assert_eq!(board.num_made_moves(), 0);
    }

    #[test]
    fn move_kind_classification() {
        let mut board = Board::startpos();
        let e2e4 = board.parse_move("e2e4").unwrap();
        assert_eq!(board.move_kind(e2e4), MoveKind::DoublePawnPush);
        let g1f3 = board.parse_move("g1f3").unwrap();
        assert_eq!(board.move_kind(g1f3), MoveKind::Quiet);

        for mv in ["e2e4", "d7d5"] {
            let mv = board.parse_move(mv).unwrap();
            board.make(mv);
        }
        let e4d5 = board.parse_move("e4d5").unwrap();
        assert_eq!(board.move_kind(e4d5), MoveKind::Capture);
    }

    #[test]
    fn en_passant_is_classified() {
        let mut board = Board::startpos();
        for mv in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            let mv = board.parse_move(mv).unwrap();
            board.make(mv);
        }
        let ep = board.parse_move("e5d6").unwrap();
        assert_eq!(board.move_kind(ep), MoveKind::EnPassant);
        assert!(board.quiescent_moves().contains(&ep));
    }

    #[test]
    fn castle_is_classified() {
        let board = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let castle = board.parse_move("e1g1").unwrap();
        assert_eq!(board.move_kind(castle), MoveKind::Castle);
    }

    #[test]
    fn promotion_is_classified() {
        let board = board("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let promo = board.parse_move("a7a8q").unwrap();
        assert_eq!(board.move_kind(promo), MoveKind::QueenPromotion);
        assert!(board.quiescent_moves().contains(&promo));
    }

    #[test]
    fn see_pawn_takes_undefended_knight() {
        let board = board("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1");
        let mv = board.parse_move("e4d5").unwrap();
        assert_eq!(board.see(mv), 320);
        assert!(board.non_negative_see(mv));
    }

    #[test]
    fn see_pawn_takes_defended_knight() {
        let board = board("4k3/8/4p3/3n4/4P3/8/8/4K3 w - - 0 1");
        let mv = board.parse_move("e4d5").unwrap();
        assert_eq!(board.see(mv), 220);
    }

    #[test]
    fn see_queen_takes_defended_pawn_loses() {
        let board = board("4k3/8/3p4/2p5/8/4Q3/8/4K3 w - - 0 1");
        let mv = board.parse_move("e3c5").unwrap();
        assert!(board.see(mv) < 0);
        assert!(!board.non_negative_see(mv));
    }

    #[test]
    fn quiescent_moves_are_captures_and_promotions() {
        let mut board = Board::startpos();
        assert!(board.quiescent_moves().is_empty());

        for mv in ["e2e4", "d7d5"] {
            let mv = board.parse_move(mv).unwrap();
            board.make(mv);
        }
        let quiescent = board.quiescent_moves();
        assert_eq!(quiescent, vec![board.parse_move("e4d5").unwrap()]);
    }

    #[test]
    fn quiescent_moves_are_all_evasions_in_check() {
        let board = board("4k3/8/8/8/7b/8/3P4/3K4 w - - 0 1");
        assert!(board.in_check());
        assert_eq!(board.quiescent_moves(), board.moves());
    }

    #[test]
    fn repetition_is_a_draw() {
        let mut board = Board::startpos();
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = board.parse_move(mv).unwrap();
            board.make(mv);
        }
        // Back to the starting position with both knights returned.
        assert!(board.is_draw());
    }

    #[test]
    fn bare_kings_are_a_draw() {
        assert!(board("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_draw());
        assert!(board("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").is_draw());
        assert!(!board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").is_draw());
    }

    #[test]
    fn fifty_move_rule() {
        assert!(board("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").is_draw());
        assert!(!board("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").is_draw());
    }

    #[test]
    fn direct_checking_squares_for_knight() {
        // White knight on f3 checks the black king on e8 from d6 or f6.
        let board = board("4k3/8/8/8/8/5N2/8/4K3 w - - 0 1");
        let checks = board.direct_checking_squares();
        let knight_checks = checks[Piece::Knight.to_index()];
        assert!(knight_checks & BitBoard::from_square(Square::D6) != EMPTY);
        assert!(knight_checks & BitBoard::from_square(Square::F6) != EMPTY);
        assert!(knight_checks & BitBoard::from_square(Square::E4) == EMPTY);
    }

    #[test]
    fn taboo_squares_cover_pawn_attacks() {
        // Black pawn on d5 attacks c4 and e4; those squares are taboo for
        // every white piece above a pawn.
        let board = board("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1");
        let taboo = board.taboo_squares();
        let c4 = BitBoard::from_square(Square::C4);
        assert!(taboo[Piece::Knight.to_index()] & c4 != EMPTY);
        assert!(taboo[Piece::Queen.to_index()] & c4 != EMPTY);
        assert!(taboo[Piece::Pawn.to_index()] == EMPTY);
    }

    #[test]
    fn null_move_round_trip() {
        let mut board = Board::startpos();
        let hash = board.hash();
        board.make_null();
        assert_ne!(board.hash(), hash);
        assert_eq!(board.last_move(), None);
        board.unmake();
        assert_eq!(board.hash(), hash);
    }

    #[test]
    fn phase_counts_material() {
        assert_eq!(Board::startpos().phase(), 24);
        assert_eq!(board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").phase(), 4);
        assert!(board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").phase() <= QUEEN_PHASE);
    }
}
