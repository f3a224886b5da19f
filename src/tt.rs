/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{tune, Board, Move, Score};

/// Kind of bound proven by the search that produced an entry.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Bound {
    /// The score is exact.
    Exact,

    /// The score is a lower bound (the search failed high).
    Lower,

    /// The score is an upper bound (the search failed low).
    Upper,
}

/// An entry of the general transposition table.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Entry {
    key: u64,

    /// Best move found for this position.
    pub best_move: Move,

    /// Depth at which the data for this entry was found.
    pub depth: i32,

    /// Kind of bound `score` proves.
    pub bound: Bound,

    score: Score,
}

impl Entry {
    /// The stored score, re-anchored to the reader's made-move count.
    ///
    /// Mate scores are stored as a distance from the node that wrote them;
    /// translating through the reader's ply keeps mate distances correct when
    /// the same position is reached along a path of a different length. This
    /// is the only cooked field in an entry.
    #[inline(always)]
    pub fn score(&self, board: &Board) -> Score {
        let made = board.num_made_moves() as i32;
        if !self.score.is_mate() {
            self.score
        } else if self.score < Score::DRAW {
            self.score + made
        } else {
            self.score - made
        }
    }
}

/// An entry of the principal-variation table.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct PvEntry {
    key: u64,

    /// Best move found for this position.
    pub best_move: Move,
}

/// Returns `true` iff `entry` alone proves a result for the given window.
///
/// That requires the entry to come from at least the requested depth and one
/// of: an exact bound; a lower bound at or above beta; an upper bound at or
/// below alpha.
#[inline(always)]
pub fn sufficient_bounds(
    entry: &Entry,
    board: &Board,
    alpha: Score,
    beta: Score,
    depth: i32,
) -> bool {
    let score = entry.score(board);
    entry.depth >= depth
        && match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        }
}

/// Transposition tables used during search: a depth-bounded general table and
/// a best-move-only table for principal-variation nodes.
///
/// Both are fixed-capacity and always-replace. Stale slots are detected by
/// comparing the stored key against the probing hash, so a save can never
/// fail and a collision is simply ignored by the reader.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<Option<Entry>>,
    pv_entries: Vec<Option<PvEntry>>,
}

impl TranspositionTable {
    /// Create a table pair with the provided capacities (rounded to powers of two).
    pub fn with_capacity(capacity: usize, pv_capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.next_power_of_two()],
            pv_entries: vec![None; pv_capacity.next_power_of_two()],
        }
    }

    /// Remove all entries from both tables.
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|slot| *slot = None);
        self.pv_entries.iter_mut().for_each(|slot| *slot = None);
    }

    /// Get the general entry for `hash` if its slot holds a matching key.
    #[inline(always)]
    pub fn get(&self, hash: u64) -> Option<&Entry> {
        let index = hash as usize & (self.entries.len() - 1);
        self.entries[index].as_ref().filter(|entry| entry.key == hash)
    }

    /// Get the PV entry for `hash` if its slot holds a matching key.
    #[inline(always)]
    pub fn get_pv(&self, hash: u64) -> Option<&PvEntry> {
        let index = hash as usize & (self.pv_entries.len() - 1);
        self.pv_entries[index]
            .as_ref()
            .filter(|entry| entry.key == hash)
    }

    /// Store a general entry for the current position, replacing whatever
    /// occupied its slot.
    pub fn save(&mut self, board: &Board, best_move: Move, score: Score, bound: Bound, depth: i32) {
        let key = board.hash();
        let made = board.num_made_moves() as i32;
        // Mate scores are anchored to the writer's ply; store them as a
        // node-relative distance instead (the inverse of `Entry::score`).
        let score = if !score.is_mate() {
            score
        } else if score < Score::DRAW {
            score - made
        } else {
            score + made
        };
        let index = key as usize & (self.entries.len() - 1);
        self.entries[index] = Some(Entry {
            key,
            best_move,
            depth,
            bound,
            score,
        });
    }

    /// Store a PV entry for the current position.
    pub fn save_pv(&mut self, board: &Board, best_move: Move) {
        let key = board.hash();
        let index = key as usize & (self.pv_entries.len() - 1);
        self.pv_entries[index] = Some(PvEntry { key, best_move });
    }
}

impl Default for TranspositionTable {
    #[inline(always)]
    fn default() -> Self {
        Self::with_capacity(tune::tt_capacity!(), tune::pv_tt_capacity!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_fields() {
        let board = Board::startpos();
        let mv = board.parse_move("e2e4").unwrap();
        let mut tt = TranspositionTable::with_capacity(128, 128);

        tt.save(&board, mv, Score::new(40), Bound::Exact, 5);
        let entry = tt.get(board.hash()).expect("entry was just saved");
        assert_eq!(entry.best_move, mv);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.bound, Bound::Exact);
        assert_eq!(entry.score(&board), Score::new(40));

        assert!(tt.get(board.hash() ^ 1).is_none());
    }

    #[test]
    fn pv_round_trip() {
        let board = Board::startpos();
        let mv = board.parse_move("d2d4").unwrap();
        let mut tt = TranspositionTable::with_capacity(128, 128);

        tt.save_pv(&board, mv);
        assert_eq!(tt.get_pv(board.hash()).unwrap().best_move, mv);
        tt.clear();
        assert!(tt.get_pv(board.hash()).is_none());
    }

    #[test]
    fn mate_scores_rebase_to_reader_ply() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
        let board: Board = fen.parse().unwrap();
        let mv = board.moves()[0];
        let mut tt = TranspositionTable::with_capacity(128, 128);
        tt.save(&board, mv, Score::mated_in(6), Bound::Exact, 3);

        // Read back at the same ply: unchanged.
        assert_eq!(
            tt.get(board.hash()).unwrap().score(&board),
            Score::mated_in(6)
        );

        // A reader that reached the same position four plies deeper sees the
        // mate at the distance appropriate to its own path.
        let mut longer: Board = fen.parse().unwrap();
        for mv in ["a1a2", "e8d8", "a2a1", "d8e8"] {
            let mv = longer.parse_move(mv).unwrap();
            longer.make(mv);
        }
        assert_eq!(longer.hash(), board.hash());
        assert_eq!(
            tt.get(longer.hash()).unwrap().score(&longer),
            Score::mated_in(10)
        );
    }

    #[test]
    fn sufficient_bounds_respects_depth_and_bound() {
        let board = Board::startpos();
        let mv = board.parse_move("e2e4").unwrap();
        let mut tt = TranspositionTable::with_capacity(128, 128);

        tt.save(&board, mv, Score::new(100), Bound::Lower, 4);
        let entry = *tt.get(board.hash()).unwrap();

        // Depth too shallow.
        assert!(!sufficient_bounds(&entry, &board, Score::new(0), Score::new(50), 5));
        // Lower bound above beta cuts.
        assert!(sufficient_bounds(&entry, &board, Score::new(0), Score::new(50), 4));
        // Lower bound below beta does not.
        assert!(!sufficient_bounds(&entry, &board, Score::new(0), Score::new(200), 4));

        tt.save(&board, mv, Score::new(100), Bound::Upper, 4);
        let entry = *tt.get(board.hash()).unwrap();
        assert!(sufficient_bounds(&entry, &board, Score::new(150), Score::new(200), 4));
        assert!(!sufficient_bounds(&entry, &board, Score::new(50), Score::new(200), 4));
    }
}
