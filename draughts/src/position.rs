/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use log::debug;

use crate::{square_count, Color, Error, Move, Piece, PieceKind, Rules, Square};

/// Piece placements of a draughts board.
///
/// Stores only the playable squares, indexed by [`Square`]. The edge length
/// is carried alongside so geometry queries need no external context.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    squares: Vec<Option<Piece>>,
    size: u8,
}

impl Board {
    /// Creates an empty [`Board`] with the given edge length.
    pub fn new(size: u8) -> Self {
        Self { squares: vec![None; square_count(size)], size }
    }

    /// Edge length of this [`Board`].
    #[inline(always)]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Fetches the [`Piece`] at `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Returns `true` if `square` holds no piece.
    #[inline(always)]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Places `piece` on `square`.
    ///
    /// The square must be empty.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.is_empty(square), "attempted to place onto occupied {square}");
        self.squares[square.index()] = Some(piece);
    }

    /// Removes and returns the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Iterates over all occupied squares in ascending order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, piece)| piece.map(|p| (Square::new(i as u8), p)))
    }

    /// Iterates over the squares occupied by `color` in ascending order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Number of pieces of `color` on this [`Board`].
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }
}

impl fmt::Display for Board {
    /// A simple grid for debugging: men lowercase, kings uppercase, `.` for
    /// empty playable squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match Square::from_row_col(row as i8, col as i8, self.size) {
                    Some(sq) => match self.piece_at(sq) {
                        Some(piece) => write!(f, " {piece}")?,
                        None => write!(f, " .")?,
                    },
                    None => write!(f, "  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A draughts position: piece placements, side to move, and move counters.
///
/// A [`Position`] is rules-agnostic; it mutates only through
/// [`make_move`](Position::make_move) / [`unmake_move`](Position::unmake_move)
/// of a [`Move`], which carries everything needed for exact reversal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    /// Plies since the last capture or promotion.
    halfmove: u32,
    /// Incremented after every Black move, starting at 1.
    fullmove: u32,
}

impl Position {
    /// Creates the initial [`Position`] of the variant described by `rules`:
    /// each side's men fill its first `size / 2 - 1` rows, White to move.
    pub fn new(rules: &Rules) -> Self {
        let mut board = Board::new(rules.size());
        let men = rules.men_per_side();
        let count = rules.square_count();
        for i in 0..men {
            board.place(Piece::new(Color::Black, PieceKind::Man), Square::new(i as u8));
            board.place(
                Piece::new(Color::White, PieceKind::Man),
                Square::new((count - men + i) as u8),
            );
        }
        Self { board, side_to_move: Color::White, halfmove: 0, fullmove: 1 }
    }

    /// Decodes a [`Position`] from draughts FEN: `<side>:W<list>:B<list>`,
    /// each list comma-separated square numbers with a `K` prefix for kings.
    ///
    /// Tolerates the PDN wrapper form `[FEN "..."]` and a doubled turn prefix
    /// (`W:B:W...:B...`), both of which older PDN emitters produce. Counters
    /// are not part of the notation and start at their defaults.
    ///
    /// # Errors
    /// [`Error::Parse`] on an unknown side token, a malformed or out-of-range
    /// entry, a square listed twice, more pieces of one color than the
    /// variant's initial setup holds, or an empty board.
    ///
    /// # Example
    /// ```
    /// # use draughts::{Color, Position, Rules};
    /// let rules = Rules::international();
    /// let pos = Position::from_fen("B:WK10,18,24:B12,K22", &rules).unwrap();
    /// assert_eq!(pos.side_to_move(), Color::Black);
    /// assert_eq!(pos.to_fen(), "B:WK10,18,24:B12,K22");
    /// ```
    pub fn from_fen(fen: &str, rules: &Rules) -> Result<Self, Error> {
        let mut text = fen.trim();
        if let Some(inner) = text.strip_prefix("[FEN \"").and_then(|t| t.strip_suffix("\"]")) {
            text = inner.trim();
        }

        let mut fields: Vec<&str> = text.split(':').collect();
        // Older emitters prepend the starting color, yielding a doubled turn
        // prefix. Keep the second field, which is the side to move.
        if fields.len() == 4 && fields[0].len() == 1 && fields[1].len() == 1 {
            fields.remove(0);
        }
        let [side, white, black] = fields[..] else {
            return Err(Error::parse("position", fen));
        };

        let side_to_move =
            Color::from_str(side).map_err(|_| Error::parse("position", side))?;

        let mut board = Board::new(rules.size());
        for (field, color) in [(white, Color::White), (black, Color::Black)] {
            let list = field
                .strip_prefix([color.token(), color.token().to_ascii_lowercase()])
                .ok_or_else(|| Error::parse("position", field))?;

            let mut placed = 0;
            for entry in list.split(',').filter(|entry| !entry.is_empty()) {
                let (kind, digits) = match entry.strip_prefix(['K', 'k']) {
                    Some(rest) => (PieceKind::King, rest),
                    None => (PieceKind::Man, entry),
                };
                let number =
                    digits.parse::<usize>().map_err(|_| Error::parse("position", entry))?;
                let square = Square::from_number(number, rules.size())
                    .ok_or_else(|| Error::parse("position", entry))?;
                if !board.is_empty(square) {
                    return Err(Error::parse("position", entry));
                }
                board.place(Piece::new(color, kind), square);
                placed += 1;
            }
            if placed > rules.men_per_side() {
                return Err(Error::parse("position", field));
            }
        }

        if board.pieces().next().is_none() {
            return Err(Error::parse("position", fen));
        }

        debug!("decoded position {text:?} for variant {}", rules.name());
        Ok(Self { board, side_to_move, halfmove: 0, fullmove: 1 })
    }

    /// Encodes this [`Position`] as draughts FEN, in the bare form without
    /// the PDN wrapper. Square lists are ascending.
    pub fn to_fen(&self) -> String {
        let list = |color: Color| {
            self.board
                .pieces_of(color)
                .map(|(sq, piece)| {
                    if piece.is_king() {
                        format!("K{sq}")
                    } else {
                        sq.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        };
        format!("{}:W{}:B{}", self.side_to_move, list(Color::White), list(Color::Black))
    }

    /// The [`Board`] of this [`Position`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies since the last capture or promotion. Drives the non-progress
    /// draw rule.
    #[inline(always)]
    pub const fn halfmove(&self) -> u32 {
        self.halfmove
    }

    /// The fullmove counter, starting at 1 and incremented after every Black
    /// move.
    #[inline(always)]
    pub const fn fullmove(&self) -> u32 {
        self.fullmove
    }

    /// Fetches the [`Piece`] at `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Returns `true` if `other` is the same position for repetition
    /// purposes: identical placements and side to move. Counters are ignored.
    pub fn is_same_as(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move && self.board == other.board
    }

    /// Applies `mv` to this [`Position`].
    ///
    /// The move is not checked for legality; generating it from this position
    /// is the caller's responsibility.
    pub fn make_move(&mut self, mv: &Move) {
        let Some(piece) = self.board.take(mv.from()) else {
            return;
        };

        for (square, _) in mv.captured() {
            self.board.take(*square);
        }

        let landed = if mv.is_promotion() { piece.promoted() } else { piece };
        self.board.place(landed, mv.to());

        if mv.is_capture() || mv.is_promotion() {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }
        self.fullmove += self.side_to_move.index() as u32;
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Exactly reverses a [`make_move`](Position::make_move) of `mv`.
    ///
    /// The non-progress counter is not recoverable from the move alone, so
    /// the caller supplies the value it had before the move.
    pub fn unmake_move(&mut self, mv: &Move, halfmove_before: u32) {
        self.side_to_move = self.side_to_move.opponent();
        self.fullmove -= self.side_to_move.index() as u32;
        self.halfmove = halfmove_before;

        let Some(piece) = self.board.take(mv.to()) else {
            return;
        };
        let original = if mv.is_promotion() { piece.demoted() } else { piece };
        self.board.place(original, mv.from());

        for (square, captured) in mv.captured() {
            self.board.place(*captured, *square);
        }
    }
}

impl fmt::Display for Position {
    /// Displays this [`Position`] as its FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
