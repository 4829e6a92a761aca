/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::Color;

/// Number of playable (dark) squares on a board with the given edge length.
#[inline(always)]
pub const fn square_count(size: u8) -> usize {
    (size as usize) * (size as usize) / 2
}

/// A playable square on a draughts board.
///
/// Only the dark squares are playable. They are numbered `1..=size²/2`
/// left-to-right, top-to-bottom, so square 1 sits in the top-left region and
/// the highest number in the bottom-right. Internally a [`Square`] stores the
/// 0-based index; [`Square::number`] gives the 1-based notation form.
///
/// Row/column geometry depends on the board's edge length, so the helpers that
/// need it take `size` as a parameter rather than baking in one variant.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(u8);

impl Square {
    /// Creates a [`Square`] from a 0-based playable-square index.
    ///
    /// The index is not range-checked here; notation decoding validates
    /// against the board size before constructing squares.
    #[inline(always)]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Creates a [`Square`] from its 1-based notation number, if it is on the
    /// board.
    #[inline(always)]
    pub fn from_number(number: usize, size: u8) -> Option<Self> {
        (1..=square_count(size)).contains(&number).then(|| Self((number - 1) as u8))
    }

    /// The 0-based index of this [`Square`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The 1-based number of this [`Square`], as used in notation.
    ///
    /// # Example
    /// ```
    /// # use draughts_types::Square;
    /// assert_eq!(Square::new(0).number(), 1);
    /// ```
    #[inline(always)]
    pub const fn number(&self) -> usize {
        self.0 as usize + 1
    }

    /// The 0-based row of this [`Square`] on a board of edge length `size`.
    ///
    /// Row 0 is the top of the board, where White promotes.
    #[inline(always)]
    pub const fn row(&self, size: u8) -> u8 {
        self.0 / (size / 2)
    }

    /// The 0-based column of this [`Square`] on a board of edge length `size`.
    ///
    /// Playable squares satisfy `(row + col) % 2 == 1`.
    #[inline(always)]
    pub const fn col(&self, size: u8) -> u8 {
        2 * (self.0 % (size / 2)) + (self.row(size) + 1) % 2
    }

    /// Creates a [`Square`] from full-board coordinates, if they name a
    /// playable square on a board of edge length `size`.
    #[inline(always)]
    pub fn from_row_col(row: i8, col: i8, size: u8) -> Option<Self> {
        let on_board = (0..size as i8).contains(&row) && (0..size as i8).contains(&col);
        let playable = (row + col) % 2 == 1;
        (on_board && playable).then(|| Self((row as u8 * (size / 2)) + (col as u8 / 2)))
    }

    /// The neighboring [`Square`] one step in `direction`, if it exists.
    ///
    /// # Example
    /// ```
    /// # use draughts_types::{Direction, Square};
    /// // On the 10x10 board, square 29 is one step southeast of square 23.
    /// let sq = Square::from_number(23, 10).unwrap();
    /// let next = sq.offset(Direction::SouthEast, 10).unwrap();
    /// assert_eq!(next.number(), 29);
    /// ```
    #[inline(always)]
    pub fn offset(&self, direction: Direction, size: u8) -> Option<Self> {
        let (dr, dc) = direction.delta();
        Self::from_row_col(self.row(size) as i8 + dr, self.col(size) as i8 + dc, size)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One of the four diagonal directions of movement.
///
/// North is toward row 0, which is White's direction of travel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All four directions, in the fixed order used for move enumeration.
    ///
    /// Everything that walks directions uses this order, so generated move
    /// lists are deterministic.
    pub const ALL: [Self; 4] = [Self::NorthWest, Self::NorthEast, Self::SouthWest, Self::SouthEast];

    /// The `(row, col)` delta of one step in this [`Direction`].
    #[inline(always)]
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Self::NorthWest => (-1, -1),
            Self::NorthEast => (-1, 1),
            Self::SouthWest => (1, -1),
            Self::SouthEast => (1, 1),
        }
    }

    /// The two forward directions for `color`: north for White, south for
    /// Black.
    #[inline(always)]
    pub const fn forward(color: Color) -> [Self; 2] {
        match color {
            Color::White => [Self::NorthWest, Self::NorthEast],
            Color::Black => [Self::SouthWest, Self::SouthEast],
        }
    }

    /// Returns `true` if this [`Direction`] is a forward direction for
    /// `color`.
    #[inline(always)]
    pub const fn is_forward(&self, color: Color) -> bool {
        match color {
            Color::White => matches!(self, Self::NorthWest | Self::NorthEast),
            Color::Black => matches!(self, Self::SouthWest | Self::SouthEast),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_round_trip() {
        for size in [8u8, 10] {
            for i in 0..square_count(size) as u8 {
                let sq = Square::new(i);
                let (r, c) = (sq.row(size), sq.col(size));
                assert_eq!((r + c) % 2, 1, "square {} on {size}x{size}", sq.number());
                assert_eq!(Square::from_row_col(r as i8, c as i8, size), Some(sq));
            }
        }
    }

    #[test]
    fn test_international_geometry() {
        // Square 1 is the top-left playable square; 50 the bottom-right.
        let one = Square::from_number(1, 10).unwrap();
        assert_eq!((one.row(10), one.col(10)), (0, 1));
        let fifty = Square::from_number(50, 10).unwrap();
        assert_eq!((fifty.row(10), fifty.col(10)), (9, 8));
        assert_eq!(Square::from_number(51, 10), None);
        assert_eq!(Square::from_number(0, 10), None);
    }

    #[test]
    fn test_offsets_at_edges() {
        // Square 5 sits in the top-right corner region of the 10x10 board.
        let five = Square::from_number(5, 10).unwrap();
        assert_eq!(five.offset(Direction::NorthEast, 10), None);
        assert_eq!(five.offset(Direction::NorthWest, 10), None);
        assert_eq!(five.offset(Direction::SouthWest, 10).unwrap().number(), 10);

        // Square 6 hugs the left edge; no westward steps.
        let six = Square::from_number(6, 10).unwrap();
        assert_eq!(six.offset(Direction::NorthWest, 10), None);
        assert_eq!(six.offset(Direction::SouthWest, 10), None);
        assert_eq!(six.offset(Direction::NorthEast, 10).unwrap().number(), 1);
        assert_eq!(six.offset(Direction::SouthEast, 10).unwrap().number(), 11);
    }

    #[test]
    fn test_forward_directions() {
        assert!(Direction::NorthWest.is_forward(Color::White));
        assert!(!Direction::NorthWest.is_forward(Color::Black));
        assert_eq!(Direction::forward(Color::Black), [Direction::SouthWest, Direction::SouthEast]);
    }
}
