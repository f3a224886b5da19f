/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{tune, Move};

/// Two quiet moves per ply that recently produced a beta cutoff, slot 0 the
/// most recent.
///
/// Plies are the absolute made-move count of the board, so a shallower
/// sibling node sees killers installed by a deeper one at the same ply.
#[derive(Debug)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    /// Forget all killer moves.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|pair| *pair = [None, None]);
    }

    /// Install `mv` as the most recent killer at `ply`, shifting the previous
    /// occupant to slot 1. Storing the move already in slot 0 is a no-op.
    ///
    /// Callers only store quiet moves; the table itself is agnostic.
    #[inline(always)]
    pub fn store(&mut self, ply: usize, mv: Move) {
        if ply >= self.slots.len() {
            return;
        }
        let pair = &mut self.slots[ply];
        if pair[0] != Some(mv) {
            pair[1] = pair[0];
            pair[0] = Some(mv);
        }
    }

    /// The slot (0 or 1) `mv` occupies at `ply`, if any.
    #[inline(always)]
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        let pair = self.slots.get(ply)?;
        if pair[0] == Some(mv) {
            Some(0)
        } else if pair[1] == Some(mv) {
            Some(1)
        } else {
            None
        }
    }
}

impl Default for KillerTable {
    #[inline(always)]
    fn default() -> Self {
        Self {
            slots: vec![[None, None]; tune::max_plies!()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn two_moves() -> (Move, Move) {
        let board = Board::startpos();
        (
            board.parse_move("e2e4").unwrap(),
            board.parse_move("d2d4").unwrap(),
        )
    }

    #[test]
    fn store_shifts_slots() {
        let (first, second) = two_moves();
        let mut killers = KillerTable::default();

        killers.store(5, first);
        assert_eq!(killers.slot_of(5, first), Some(0));

        killers.store(5, second);
        assert_eq!(killers.slot_of(5, second), Some(0));
        assert_eq!(killers.slot_of(5, first), Some(1));
    }

    #[test]
    fn restoring_slot_zero_does_not_duplicate() {
        let (first, second) = two_moves();
        let mut killers = KillerTable::default();

        killers.store(0, first);
        killers.store(0, second);
        killers.store(0, second);
        // The two slots never hold the same move.
        assert_eq!(killers.slot_of(0, second), Some(0));
        assert_eq!(killers.slot_of(0, first), Some(1));
    }

    #[test]
    fn plies_are_independent_and_clear_wipes() {
        let (first, _) = two_moves();
        let mut killers = KillerTable::default();

        killers.store(3, first);
        assert_eq!(killers.slot_of(3, first), Some(0));
        assert_eq!(killers.slot_of(4, first), None);

        killers.clear();
        assert_eq!(killers.slot_of(3, first), None);
    }

    #[test]
    fn out_of_range_ply_is_ignored() {
        let (first, _) = two_moves();
        let mut killers = KillerTable::default();
        killers.store(1 << 20, first);
        assert_eq!(killers.slot_of(1 << 20, first), None);
    }
}
