/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// Enums for piece kinds, colors, and a struct for a draughts piece.
mod piece;
/// Pseudo-random number generation with a fixed seed.
///
/// Primarily for Zobrist table generation.
mod prng;
/// Playable squares of a draughts board and the diagonal directions.
mod square;
/// Variant rule configuration: board size, capture policy, king movement.
mod variant;

pub use piece::*;
pub use prng::*;
pub use square::*;
pub use variant::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::piece::*;
    pub use crate::prng::*;
    pub use crate::square::*;
    pub use crate::variant::*;
}
