/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The move-ordering feature catalogue and its learned weights.
//!
//! Every candidate move maps to a sparse binary vector over a fixed, dense
//! index space; the ordering score is the dot product with the weight vector.
//! The catalogue layout is append-only: the trainers, the weight files and
//! the gauge pins all depend on these offsets.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use chess::Square;

/// Total number of move-ordering features.
pub const NUM_FEATURES: usize = 89;

/// Index offsets of each feature block.
pub mod idx {
    /// The move equals the hash/PV hint (1).
    pub const HASH_MOVE: usize = 0;
    /// The move occupies killer slot 0 or 1 (2).
    pub const KILLER: usize = 1;
    /// Moving piece kind x target piece kind, empty target folded into the
    /// unused king column (6 x 6).
    pub const PIECE_X_TARGET: usize = 3;
    /// Move kind tag (9).
    pub const MOVE_TYPE: usize = 39;
    /// Symmetry-folded bucket of the source square (16).
    pub const MOVE_SOURCE: usize = 48;
    /// Symmetry-folded bucket of the destination square (16).
    pub const MOVE_DESTINATION: usize = 64;
    /// The move captures on the square the opponent just moved to (1).
    pub const CAPTURE_LAST_MOVED: usize = 80;
    /// The destination delivers a direct check (1).
    pub const GIVES_CHECK: usize = 81;
    /// SEE-losing capture; SEE-losing checking move (2).
    pub const SEE: usize = 82;
    /// Quiet move onto a square attacked by a cheaper enemy piece (1).
    pub const TABOO_DESTINATION: usize = 84;
    /// is_forcing(move) + 2 * is_forcing(previous move) (4).
    pub const FORCING: usize = 85;
}

/// Description of each feature block, by starting index.
///
/// The final sentinel marks the end of the index space; the weight
/// description file is generated by walking this list.
pub const FEATURE_INFOS: [(usize, &str); 12] = [
    (idx::HASH_MOVE, "Hash move"),
    (idx::KILLER, "Killer move"),
    (idx::PIECE_X_TARGET, "Piece type x target piece type"),
    (idx::MOVE_TYPE, "Move type"),
    (idx::MOVE_SOURCE, "Move source bucket"),
    (idx::MOVE_DESTINATION, "Move destination bucket"),
    (idx::CAPTURE_LAST_MOVED, "Captures piece moved last"),
    (idx::GIVES_CHECK, "Gives direct check"),
    (idx::SEE, "Negative SEE"),
    (idx::TABOO_DESTINATION, "Taboo destination"),
    (idx::FORCING, "Forcing x last move forcing"),
    (NUM_FEATURES, "end"),
];

/// The three gauge features pinned to zero during training, fixing the linear
/// model's translation degeneracy. The reference situation is a king moving
/// into the corner with nothing else special.
pub const GAUGE_FEATURES: [usize; 3] = [
    // En-passant move kind.
    idx::MOVE_TYPE + 2,
    // King x empty-target bigram.
    idx::PIECE_X_TARGET + 5 * 6 + 5,
    // First source bucket (the corners).
    idx::MOVE_SOURCE,
];

/// Fold a square into one of 16 buckets by mirroring both axes toward a1.
///
/// Both colors share the table, so the folding is symmetric in rank as well
/// as file.
#[inline(always)]
pub fn square_bucket(square: Square) -> usize {
    let file = square.get_file().to_index();
    let rank = square.get_rank().to_index();
    let file = file.min(7 - file);
    let rank = rank.min(7 - rank);
    rank * 4 + file
}

/// Hand-tuned starting point for the move-ordering weights, in catalogue
/// order. Overwritten by training; gauge features are zero by construction.
#[rustfmt::skip]
const DEFAULT_WEIGHTS: [i32; NUM_FEATURES] = [
    // Hash move
    2000,
    // Killer slots
    1150, 920,
    // Piece x target (pawn, knight, bishop, rook, queen, none as columns)
    220,  640,  650,  790, 1100,   10,
    150,  380,  400,  700, 1050,  -20,
    140,  360,  390,  680, 1040,  -15,
     90,  240,  260,  420,  980,  -45,
     60,  190,  210,  300,  520,  -60,
    110,  230,  250,  340,  470,    0,
    // Move type: quiet, double push, en passant, capture, castle, N/B/R/Q promotion
     25,   60,    0,  180,  340, -650, -2000, -2000, 880,
    // Source bucket
      0,  -10,  -25,  -30,   15,    5,  -10,  -20,
     30,   20,   10,   -5,   45,   35,   25,   10,
    // Destination bucket
    -40,  -20,   -5,   10,  -15,    5,   25,   40,
     -5,   20,   45,   60,    5,   30,   55,   75,
    // Captures piece moved last
    130,
    // Gives direct check
    160,
    // Negative SEE: capture, checking move
    -420, -380,
    // Taboo destination
    -190,
    // Forcing x last forcing
      0,   85,  -20,   60,
];

/// Dense binary feature vector of a single move, extracted by the move
/// orderer and consumed by the trainers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureVector(pub [i32; NUM_FEATURES]);

/// The learned move-ordering weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    values: [i32; NUM_FEATURES],
}

impl Weights {
    /// Wrap a full vector of weight values.
    #[inline(always)]
    pub fn from_values(values: [i32; NUM_FEATURES]) -> Self {
        Self { values }
    }

    /// The weight of feature `index`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    /// All weight values in catalogue order.
    #[inline(always)]
    pub fn values(&self) -> &[i32; NUM_FEATURES] {
        &self.values
    }

    /// Load weights from a file of whitespace-separated integers in
    /// catalogue order.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading weights from {}", path.display()))?;
        let mut values = [0i32; NUM_FEATURES];
        let mut tokens = contents.split_whitespace();
        for (i, value) in values.iter_mut().enumerate() {
            let token = tokens
                .next()
                .with_context(|| format!("{}: expected {NUM_FEATURES} weights, found {i}", path.display()))?;
            *value = token
                .parse()
                .with_context(|| format!("{}: malformed weight {token:?}", path.display()))?;
        }
        ensure!(
            tokens.next().is_none(),
            "{}: trailing data after {NUM_FEATURES} weights",
            path.display()
        );
        Ok(Self { values })
    }

    /// Write the weights to `path`, one per line, and a human-readable side
    /// file annotating each weight with its feature category.
    pub fn save(&self, path: &Path, description_path: &Path) -> Result<()> {
        let mut plain = String::new();
        let mut described = String::new();
        let mut info = 0;
        for (i, value) in self.values.iter().enumerate() {
            if i == FEATURE_INFOS[info + 1].0 {
                info += 1;
            }
            writeln!(plain, "{value}").expect("writing to a String cannot fail");
            writeln!(described, "{value} <-- {}", FEATURE_INFOS[info].1)
                .expect("writing to a String cannot fail");
        }
        fs::write(path, plain).with_context(|| format!("writing {}", path.display()))?;
        fs::write(description_path, described)
            .with_context(|| format!("writing {}", description_path.display()))?;
        Ok(())
    }
}

impl Default for Weights {
    #[inline(always)]
    fn default() -> Self {
        Self {
            values: DEFAULT_WEIGHTS,
        }
    }
}

impl std::ops::Index<usize> for Weights {
    type Output = i32;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
