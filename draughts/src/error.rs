/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::Move;

/// A recoverable error from notation decoding or gameplay.
///
/// Game-ending conditions (wins, draws) are not errors; they are reported
/// through [`GameOutcome`](crate::GameOutcome).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Text that could not be decoded as a position or move.
    #[error("failed to parse {what}: {token:?}")]
    Parse {
        /// What was being decoded ("position", "move", ...).
        what: &'static str,
        /// The offending token.
        token: String,
    },

    /// A well-formed move that is not legal in the current position.
    ///
    /// Carries the full legal-move list so the caller can recover without a
    /// second query.
    #[error("illegal move {text:?}; legal moves are [{}]", join_moves(.legal))]
    IllegalMove {
        /// The rejected move text.
        text: String,
        /// Every move that would have been accepted.
        legal: Vec<Move>,
    },

    /// An undo was requested with no moves on the stack. The game state is
    /// unchanged.
    #[error("cannot undo: no moves have been played")]
    HistoryEmpty,
}

impl Error {
    /// Convenience constructor for [`Error::Parse`].
    pub(crate) fn parse(what: &'static str, token: impl Into<String>) -> Self {
        Self::Parse { what, token: token.into() }
    }
}

fn join_moves(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::parse("move", "28y37");
        assert_eq!(err.to_string(), "failed to parse move: \"28y37\"");
        assert_eq!(Error::HistoryEmpty.to_string(), "cannot undo: no moves have been played");
    }
}
