/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not, str::FromStr};

use anyhow::bail;

/// The two players of a game of draughts.
///
/// White occupies the high-numbered squares and moves toward square 1 ("north");
/// Black mirrors it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Number of color variants. Used for array sizes.
    pub const COUNT: usize = 2;

    /// Returns this [`Color`]'s opposite; White to Black and vice versa.
    ///
    /// # Example
    /// ```
    /// # use draughts_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`: `0` for White, `1` for Black.
    ///
    /// Useful for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Color`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// The single-letter token used for this side in position notation.
    #[inline(always)]
    pub const fn token(&self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" | "w" => Ok(Self::White),
            "B" | "b" => Ok(Self::Black),
            _ => bail!("unrecognized side token {s:?}; expected W or B"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The rank of a draughts piece: an unpromoted Man or a promoted King.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Man,
    King,
}

impl PieceKind {
    /// Number of kind variants. Used for array sizes.
    pub const COUNT: usize = 2;

    /// Returns this [`PieceKind`] as a `usize`: `0` for Man, `1` for King.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// A draughts piece: a [`Color`] and a [`PieceKind`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`] from the provided [`Color`] and [`PieceKind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this [`Piece`] is a Man.
    #[inline(always)]
    pub const fn is_man(&self) -> bool {
        matches!(self.kind, PieceKind::Man)
    }

    /// Returns `true` if this [`Piece`] is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns this [`Piece`] promoted to a King, keeping its [`Color`].
    ///
    /// # Example
    /// ```
    /// # use draughts_types::{Color, Piece, PieceKind};
    /// let man = Piece::new(Color::White, PieceKind::Man);
    /// assert!(man.promoted().is_king());
    /// ```
    #[inline(always)]
    pub const fn promoted(self) -> Self {
        Self::new(self.color, PieceKind::King)
    }

    /// Returns this [`Piece`] demoted back to a Man, keeping its [`Color`].
    ///
    /// Used when a promotion is reversed during undo.
    #[inline(always)]
    pub const fn demoted(self) -> Self {
        Self::new(self.color, PieceKind::Man)
    }

    /// A one-character representation of this [`Piece`].
    ///
    /// Men are lowercase, Kings are uppercase; `w`/`W` for White, `b`/`B` for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Man) => 'w',
            (Color::White, PieceKind::King) => 'W',
            (Color::Black, PieceKind::Man) => 'b',
            (Color::Black, PieceKind::King) => 'B',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_tokens() {
        assert_eq!(Color::from_str("W").unwrap(), Color::White);
        assert_eq!(Color::from_str("b").unwrap(), Color::Black);
        assert!(Color::from_str("x").is_err());
        assert!(Color::from_str("WB").is_err());
        assert_eq!(Color::White.to_string(), "W");
    }

    #[test]
    fn test_promotion_round_trip() {
        let man = Piece::new(Color::Black, PieceKind::Man);
        assert_eq!(man.promoted().demoted(), man);
        assert_eq!(man.promoted().color(), Color::Black);
    }
}
