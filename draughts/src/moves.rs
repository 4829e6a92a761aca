/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use arrayvec::ArrayVec;

use crate::{Error, Game, Piece, Square};

/// Maximum number of squares a single move can visit.
///
/// A chain cannot capture more pieces than the opponent has, which the
/// notation codec caps at the initial-setup count: 30 on the largest (12x12)
/// supported board, plus the origin square.
pub const MAX_CHAIN: usize = 32;

/// Represents a single move, either a quiet step or a capture chain.
///
/// A [`Move`] records everything needed to apply it and to reverse it without
/// re-running the rules: the full visited-square path, each captured piece
/// together with the square it stood on, and whether the mover promotes.
///
/// Moves display in standard notation: `31-26` for a step, `48x37x26` for a
/// chain, one landing square per jump.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    /// Origin, each landing square in order, destination last.
    path: ArrayVec<Square, MAX_CHAIN>,
    /// Captured pieces in jump order, with the squares they occupied.
    captured: ArrayVec<(Square, Piece), MAX_CHAIN>,
    /// Whether the moving piece ends the move as a newly-promoted king.
    promotion: bool,
}

impl Move {
    /// Creates a quiet (non-capturing) move.
    pub fn quiet(from: Square, to: Square, promotion: bool) -> Self {
        let mut path = ArrayVec::new();
        path.push(from);
        path.push(to);
        Self { path, captured: ArrayVec::new(), promotion }
    }

    /// Creates a capture chain from its visited path and capture list.
    pub fn capture(
        path: ArrayVec<Square, MAX_CHAIN>,
        captured: ArrayVec<(Square, Piece), MAX_CHAIN>,
        promotion: bool,
    ) -> Self {
        debug_assert!(path.len() >= 2);
        debug_assert_eq!(path.len(), captured.len() + 1);
        Self { path, captured, promotion }
    }

    /// The [`Square`] the piece moved from.
    #[inline(always)]
    pub fn from(&self) -> Square {
        self.path[0]
    }

    /// The [`Square`] the piece ended on.
    #[inline(always)]
    pub fn to(&self) -> Square {
        self.path[self.path.len() - 1]
    }

    /// Every square the piece visited, origin first and destination last.
    #[inline(always)]
    pub fn path(&self) -> &[Square] {
        &self.path
    }

    /// The captured pieces in jump order, with the squares they stood on.
    #[inline(always)]
    pub fn captured(&self) -> &[(Square, Piece)] {
        &self.captured
    }

    /// Returns `true` if this [`Move`] captures at least one piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Number of pieces this [`Move`] captures.
    #[inline(always)]
    pub fn num_captured(&self) -> usize {
        self.captured.len()
    }

    /// Returns `true` if the moving piece promotes to a king.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }

    /// Decodes move text and resolves it against `game`'s current legal moves.
    ///
    /// Accepts `a-b` for a step and `axbxc...` for a capture chain, where
    /// every `x`-separated value is the landing square after one jump.
    ///
    /// # Errors
    /// [`Error::Parse`] if the text is not well-formed move notation;
    /// [`Error::IllegalMove`] (carrying the full legal list) if it is
    /// well-formed but matches no legal move.
    ///
    /// # Example
    /// ```
    /// # use draughts::{Game, Move, Rules};
    /// let game = Game::new(Rules::international());
    /// let mv = Move::from_text("32-28", &game).unwrap();
    /// assert_eq!(mv.to_string(), "32-28");
    /// assert!(Move::from_text("30-24", &game).is_err());
    /// ```
    pub fn from_text(text: &str, game: &Game) -> Result<Self, Error> {
        let trimmed = text.trim();
        let is_capture = trimmed.contains(['x', 'X']);
        let mut numbers = Vec::new();
        for token in trimmed.split(['x', 'X', '-']) {
            let number = token
                .parse::<usize>()
                .map_err(|_| Error::parse("move", trimmed))?;
            let square = Square::from_number(number, game.rules().size())
                .ok_or_else(|| Error::parse("move", trimmed))?;
            numbers.push(square);
        }
        if numbers.len() < 2 {
            return Err(Error::parse("move", trimmed));
        }

        let legal = game.get_legal_moves();
        legal
            .iter()
            .find(|mv| mv.is_capture() == is_capture && mv.path() == numbers.as_slice())
            .cloned()
            .ok_or_else(|| Error::IllegalMove { text: trimmed.to_string(), legal })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { "x" } else { "-" };
        let mut squares = self.path.iter();
        if let Some(first) = squares.next() {
            write!(f, "{first}")?;
        }
        for sq in squares {
            write!(f, "{sep}{sq}")?;
        }
        Ok(())
    }
}
