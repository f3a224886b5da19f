/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Tunable parameters for the search.
//!
//! Kept as macros so call sites stay branch-free constants while still being
//! greppable and adjustable in one place.

/// Whether null move pruning is enabled.
macro_rules! use_null_moves {
    () => {
        true
    };
}
pub(crate) use use_null_moves;

/// Whether the static-evaluation based pruning techniques (both the node-level
/// prelude and the per-move futility skip) are enabled.
macro_rules! use_score_based_pruning {
    () => {
        true
    };
}
pub(crate) use use_score_based_pruning;

/// Depth subtracted (in addition to the usual one) when searching a null move.
macro_rules! null_move_reduction {
    () => {
        2
    };
}
pub(crate) use null_move_reduction;

/// Hard cap on iterative deepening depth.
macro_rules! max_depth {
    () => {
        128
    };
}
pub(crate) use max_depth;

/// Greatest made-move count the killer table can index.
macro_rules! max_plies {
    () => {
        1024
    };
}
pub(crate) use max_plies;

/// Futility margins indexed by residual depth.
macro_rules! futility_margins {
    () => {
        [0, 500, 1000, 1500]
    };
}
pub(crate) use futility_margins;

/// Starting half-width of the aspiration window, doubled on each failure.
macro_rules! aspiration_delta {
    () => {
        500
    };
}
pub(crate) use aspiration_delta;

/// Deepest node the sampling search modes will capture.
macro_rules! max_depth_sampled {
    () => {
        3
    };
}
pub(crate) use max_depth_sampled;

/// Number of entries in the general transposition table.
macro_rules! tt_capacity {
    () => {
        1 << 20
    };
}
pub(crate) use tt_capacity;

/// Number of entries in the principal-variation table.
macro_rules! pv_tt_capacity {
    () => {
        1 << 16
    };
}
pub(crate) use pv_tt_capacity;
