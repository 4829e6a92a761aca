/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Piece, PieceKind, Position, Rules, Xorshift};

/// A Zobrist hash of a position: placements and side to move.
///
/// Counters are deliberately excluded, so two positions that differ only in
/// move counters hash identically. That is exactly the identity the
/// repetition rule wants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ZobristKey(u64);

impl fmt::Display for ZobristKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Pseudo-random keys for hashing positions of one board size.
///
/// Built per session from the fixed-seed [`Xorshift`] generator, so the same
/// variant always gets the same table and keys are stable across runs.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    /// One key per (square, color, kind) combination.
    piece_keys: Vec<[u64; Color::COUNT * PieceKind::COUNT]>,
    /// Applied when Black is to move.
    side_key: u64,
}

impl ZobristTable {
    /// Builds the table for the board size of `rules`.
    pub fn new(rules: &Rules) -> Self {
        let mut prng = Xorshift::new();
        let piece_keys = (0..rules.square_count())
            .map(|_| std::array::from_fn(|_| prng.get_next()))
            .collect();
        Self { piece_keys, side_key: prng.get_next() }
    }

    /// Hashes `position` from scratch.
    pub fn hash(&self, position: &Position) -> ZobristKey {
        let mut key = 0;
        for (square, piece) in position.board().pieces() {
            key ^= self.piece_keys[square.index()][Self::piece_index(piece)];
        }
        if position.side_to_move() == Color::Black {
            key ^= self.side_key;
        }
        ZobristKey(key)
    }

    #[inline(always)]
    fn piece_index(piece: Piece) -> usize {
        piece.color().index() * PieceKind::COUNT + piece.kind().index()
    }
}
