/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The engine's view of a chess position, wrapping the external move generator.
mod board;

/// Evaluation of chess positions.
mod eval;

/// The move-ordering feature catalogue and its learned weights.
mod features;

/// Killer move bookkeeping.
mod killers;

/// Move ordering policies.
mod ordering;

/// Types and utilities for rating how good/bad a position is.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Transposition tables.
mod tt;

/// Tunable search parameters.
mod tune;

/// Training loops for the move-ordering weights.
pub mod train;

pub use board::*;
pub use eval::*;
pub use features::*;
pub use killers::*;
pub use ordering::*;
pub use score::*;
pub use search::*;
pub use tt::*;
