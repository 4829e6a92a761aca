/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use draughts_types::*;

/// Recoverable errors from notation decoding and gameplay.
mod error;
/// High-level abstraction of a game of draughts: legality checks, undo,
/// repetition tracking, outcomes.
mod game;
/// All code related to generating legal moves under a variant's rules.
mod movegen;
/// Enums and structs for modeling a move, quiet or capturing.
mod moves;
/// Utility functions for performance testing.
mod perft;
/// A draughts board, complete with piece placements and turn counters.
mod position;
/// Fixed-depth alpha-beta search with iterative deepening.
mod search;
/// Zobrist keys for hashing draughts positions.
mod zobrist;

pub use error::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use search::*;
pub use zobrist::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use crate::search::*;
    pub use crate::zobrist::*;
    pub use draughts_types::*;
}
