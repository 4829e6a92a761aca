/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::HashMap, fmt, ops::Deref};

use log::debug;

use crate::{
    compute_legal_moves, Color, Error, Move, MoveList, Position, Rules, ZobristKey, ZobristTable,
};

/// The status of a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    /// The side to move has at least one legal move and no draw rule applies.
    InProgress,
    /// The named color won: its opponent has no legal move.
    Win(Color),
    /// The game is drawn.
    Draw(DrawReason),
}

/// Why a game was drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawReason {
    /// The same position (placements and side to move) occurred the
    /// threshold number of times.
    Repetition,
    /// The threshold number of plies passed without a capture or promotion.
    NonProgress,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Win(Color::White) => write!(f, "White wins"),
            Self::Win(Color::Black) => write!(f, "Black wins"),
            Self::Draw(DrawReason::Repetition) => write!(f, "draw by repetition"),
            Self::Draw(DrawReason::NonProgress) => write!(f, "draw by lack of progress"),
        }
    }
}

/// One entry of the undo stack.
#[derive(Clone, Debug)]
struct HistoryEntry {
    mv: Move,
    /// Non-progress counter before the move, for exact reversal.
    halfmove: u32,
    /// Hash of the position the move produced; its repetition count is
    /// decremented on undo.
    key: ZobristKey,
}

/// A playable game: a [`Position`] plus the [`Rules`] it is played under,
/// an undo stack, and a repetition table.
///
/// All gameplay goes through a [`Game`]. It dereferences to its current
/// [`Position`], so position accessors are available directly:
///
/// ```
/// # use draughts::{Color, Game, Rules};
/// let game = Game::new(Rules::english());
/// assert_eq!(game.side_to_move(), Color::White);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    rules: Rules,
    position: Position,
    zobrist: ZobristTable,
    history: Vec<HistoryEntry>,
    repetitions: HashMap<ZobristKey, u32>,
}

impl Game {
    /// Creates a new [`Game`] from the initial setup of `rules`.
    pub fn new(rules: Rules) -> Self {
        let position = Position::new(&rules);
        Self::with_position(rules, position)
    }

    /// Creates a new [`Game`] from a position in draughts FEN.
    ///
    /// # Errors
    /// [`Error::Parse`] if the FEN is malformed; see
    /// [`Position::from_fen`].
    pub fn from_fen(rules: Rules, fen: &str) -> Result<Self, Error> {
        let position = Position::from_fen(fen, &rules)?;
        Ok(Self::with_position(rules, position))
    }

    fn with_position(rules: Rules, position: Position) -> Self {
        let zobrist = ZobristTable::new(&rules);
        let key = zobrist.hash(&position);
        debug!("new {} game at {position} (key {key})", rules.name());
        Self {
            rules,
            position,
            zobrist,
            history: Vec::new(),
            // The starting position counts as its first occurrence.
            repetitions: HashMap::from([(key, 1)]),
        }
    }

    /// The [`Rules`] this [`Game`] is played under.
    #[inline(always)]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The current [`Position`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The Zobrist hash of the current position.
    pub fn key(&self) -> ZobristKey {
        self.zobrist.hash(&self.position)
    }

    /// Number of moves played so far.
    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Computes all legal moves in the current position.
    ///
    /// The order is deterministic; see
    /// [`compute_legal_moves`](crate::compute_legal_moves).
    pub fn get_legal_moves(&self) -> MoveList {
        compute_legal_moves(&self.position, &self.rules)
    }

    /// Applies `mv` without checking it for legality.
    ///
    /// Pushing a move that was not generated from the current position leaves
    /// the game in an unspecified state.
    pub fn push(&mut self, mv: Move) {
        let halfmove = self.position.halfmove();
        self.position.make_move(&mv);
        let key = self.zobrist.hash(&self.position);
        *self.repetitions.entry(key).or_insert(0) += 1;
        self.history.push(HistoryEntry { mv, halfmove, key });
    }

    /// Applies `mv` after confirming it is legal in the current position.
    ///
    /// # Errors
    /// [`Error::IllegalMove`] (carrying the legal list) if it is not; the
    /// game is unchanged.
    pub fn push_checked(&mut self, mv: Move) -> Result<(), Error> {
        let legal = self.get_legal_moves();
        if !legal.contains(&mv) {
            return Err(Error::IllegalMove { text: mv.to_string(), legal });
        }
        self.push(mv);
        Ok(())
    }

    /// Decodes move text and applies it.
    ///
    /// # Errors
    /// As [`Move::from_text`]; the game is unchanged on error.
    ///
    /// # Example
    /// ```
    /// # use draughts::{Game, Rules};
    /// let mut game = Game::new(Rules::international());
    /// game.push_text("32-28").unwrap();
    /// game.push_text("19-23").unwrap();
    /// assert!(game.push_text("28-22").is_err()); // 28x19 is forced
    /// ```
    pub fn push_text(&mut self, text: &str) -> Result<(), Error> {
        let mv = Move::from_text(text, self)?;
        self.push(mv);
        Ok(())
    }

    /// Undoes the most recent move, restoring the position, its counters,
    /// and the repetition table exactly. Returns the undone [`Move`].
    ///
    /// # Errors
    /// [`Error::HistoryEmpty`] if no moves have been played; the game is
    /// unchanged.
    pub fn pop(&mut self) -> Result<Move, Error> {
        let entry = self.history.pop().ok_or(Error::HistoryEmpty)?;
        if let Some(count) = self.repetitions.get_mut(&entry.key) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&entry.key);
            }
        }
        self.position.unmake_move(&entry.mv, entry.halfmove);
        Ok(entry.mv)
    }

    /// The current [`GameOutcome`], recomputed on demand.
    ///
    /// Draw rules are checked before the no-move rule, so a position that is
    /// both repeated past the threshold and stuck is a draw.
    pub fn outcome(&self) -> GameOutcome {
        let occurrences = self.repetitions.get(&self.key()).copied().unwrap_or(0);
        if occurrences >= self.rules.repetition_threshold() {
            return GameOutcome::Draw(DrawReason::Repetition);
        }
        if self.position.halfmove() >= self.rules.nonprogress_threshold() {
            return GameOutcome::Draw(DrawReason::NonProgress);
        }
        if self.get_legal_moves().is_empty() {
            return GameOutcome::Win(self.position.side_to_move().opponent());
        }
        GameOutcome::InProgress
    }

    /// Returns `true` if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.outcome() != GameOutcome::InProgress
    }
}

impl Deref for Game {
    type Target = Position;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_reports_legal_set() {
        let fen = "W:W4,11,28,31,K33,K34,38,40,K41,43,K44,45,K46,47:BK3,21,27,32";
        let mut game = Game::from_fen(Rules::international(), fen).unwrap();

        let err = game.push_text("10x42").unwrap_err();
        let Error::IllegalMove { text, legal } = err else {
            panic!("expected IllegalMove, got {err:?}");
        };
        assert_eq!(text, "10x42");
        let legal: Vec<String> = legal.iter().map(|mv| mv.to_string()).collect();
        assert_eq!(legal, ["28x37", "31x22"]);

        // The game is unchanged and both legal moves still apply.
        assert_eq!(game.to_fen(), fen);
        assert!(game.push_text("31x22").is_ok());
    }

    #[test]
    fn test_push_pop_restores_everything() {
        let mut game = Game::new(Rules::international());
        let initial_fen = game.to_fen();
        let initial_key = game.key();

        game.push_text("32-28").unwrap();
        game.push_text("17-21").unwrap();
        game.push_text("37-32").unwrap();

        assert_eq!(game.ply(), 3);
        let undone = game.pop().unwrap();
        assert_eq!(undone.to_string(), "37-32");
        game.pop().unwrap();
        game.pop().unwrap();

        assert_eq!(game.to_fen(), initial_fen);
        assert_eq!(game.key(), initial_key);
        assert_eq!(game.halfmove(), 0);
        assert_eq!(game.fullmove(), 1);
        assert_eq!(game.pop().unwrap_err(), Error::HistoryEmpty);
    }

    #[test]
    fn test_repetition_draw_on_third_occurrence() {
        let mut game = Game::from_fen(Rules::international(), "W:WK5:BK50").unwrap();
        let shuffle = ["5-10", "50-45", "10-5", "45-50"];

        for round in 0..2 {
            for text in shuffle {
                assert_eq!(game.outcome(), GameOutcome::InProgress, "round {round} at {text}");
                game.push_text(text).unwrap();
            }
        }
        // The starting position has now occurred three times.
        assert_eq!(game.ply(), 8);
        assert_eq!(game.outcome(), GameOutcome::Draw(DrawReason::Repetition));

        // Undo lifts the draw.
        game.pop().unwrap();
        assert_eq!(game.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_nonprogress_draw() {
        let rules = Rules::english().with_nonprogress_threshold(4);
        let mut game = Game::from_fen(rules, "W:WK32:BK1").unwrap();

        for text in ["32-27", "1-5", "27-32", "5-1"] {
            assert_eq!(game.outcome(), GameOutcome::InProgress);
            game.push_text(text).unwrap();
        }
        assert_eq!(game.outcome(), GameOutcome::Draw(DrawReason::NonProgress));
    }

    #[test]
    fn test_no_legal_moves_loses() {
        let game = Game::from_fen(Rules::english(), "B:WK32:B28").unwrap();
        assert_eq!(game.outcome(), GameOutcome::Win(Color::White));
        assert!(game.is_game_over());
    }

    #[test]
    fn test_push_checked_rejects_foreign_move() {
        let mut game = Game::new(Rules::english());
        let stranger = Move::quiet(
            crate::Square::from_number(1, 8).unwrap(),
            crate::Square::from_number(5, 8).unwrap(),
            false,
        );
        assert!(matches!(game.push_checked(stranger), Err(Error::IllegalMove { .. })));
        assert_eq!(game.ply(), 0);
    }
}
