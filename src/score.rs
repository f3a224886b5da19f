/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use uci_parser::UciScore;

/// Number of internal evaluation units per centipawn.
pub const EVAL_SCALE: i32 = 8;

/// Width of the band at either end of the score range reserved for mate scores.
pub(crate) const MATE_BAND: i32 = 2000;

/// A numerical representation of the evaluation of a position / move.
///
/// Internally scaled so that one centipawn equals [`EVAL_SCALE`] units.
/// Mate scores live in the outer [`MATE_BAND`]-wide bands and are anchored to
/// the number of moves made on the board when the mate was detected, so that
/// shorter mates always compare as better.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Score(pub(crate) i32);

impl Score {
    /// Largest possible score ever achievable.
    pub const MAX: Self = Self(100_000);

    /// Lowest possible score ever achievable.
    pub const MIN: Self = Self(-Self::MAX.0);

    /// Score of a draw.
    pub const DRAW: Self = Self(0);

    /// Constructs a new [`Score`] instance.
    #[inline(always)]
    pub const fn new(score: i32) -> Self {
        Self(score)
    }

    /// Returns the inner value of this [`Score`].
    #[inline(always)]
    pub const fn inner(self) -> i32 {
        self.0
    }

    /// The score of the side to move being mated after `made_moves` plies of game history.
    ///
    /// Anchoring to the made-move count means a mate suffered later scores higher
    /// (less bad) than one suffered sooner.
    #[inline(always)]
    pub const fn mated_in(made_moves: usize) -> Self {
        Self(Self::MIN.0 + made_moves as i32)
    }

    /// Returns `true` if the score lies in either mate band.
    #[inline(always)]
    pub const fn is_mate(&self) -> bool {
        self.0 < Self::MIN.0 + MATE_BAND || self.0 > Self::MAX.0 - MATE_BAND
    }

    /// Returns the absolute value of this [`Score`].
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Converts this [`Score`] into a [`UciScore`], determining whether it is a
    /// centipawn score or a mate score.
    ///
    /// `made_moves` is the made-move count of the root position, used to
    /// translate a ply-anchored mate score into a moves-to-mate count.
    #[inline(always)]
    pub fn into_uci(self, made_moves: usize) -> UciScore {
        if !self.is_mate() {
            return UciScore::cp(self.0 / EVAL_SCALE);
        }
        let made = made_moves as i32;
        if self.0 < 0 {
            UciScore::mate(-(self.0 - Self::MIN.0 - made) / 2)
        } else {
            UciScore::mate((Self::MAX.0 - self.0 - made + 2) / 2)
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_band_boundaries() {
        assert!(Score::mated_in(0).is_mate());
        assert!(Score::mated_in(1024).is_mate());
        assert!((-Score::mated_in(12)).is_mate());
        assert!(!Score::DRAW.is_mate());
        assert!(!Score::new(Score::MAX.0 - MATE_BAND).is_mate());
        assert!(Score::new(Score::MAX.0 - MATE_BAND + 1).is_mate());
    }

    #[test]
    fn min_is_negated_max() {
        assert_eq!(Score::MIN, -Score::MAX);
    }

    #[test]
    fn uci_centipawns_are_descaled() {
        assert_eq!(
            Score::new(80).into_uci(0).to_string(),
            UciScore::cp(10).to_string()
        );
        assert_eq!(
            Score::new(-64).into_uci(4).to_string(),
            UciScore::cp(-8).to_string()
        );
    }

    #[test]
    fn uci_mate_in_one() {
        // Mating the opponent one ply from a root with 6 made moves: the mate
        // lands at ply 7, which is one of our moves.
        let score = -Score::mated_in(7);
        assert_eq!(score.into_uci(6).to_string(), UciScore::mate(1).to_string());

        // Being mated on the opponent's next move.
        let score = Score::mated_in(8);
        assert_eq!(score.into_uci(6).to_string(), UciScore::mate(-1).to_string());
    }
}
