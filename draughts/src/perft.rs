/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Game, Move};

/// Counts the leaf nodes of the legal-move tree of `game` at `depth`.
///
/// A capture chain counts as a single move, however many pieces it takes.
/// The game is returned to its original state before this function returns.
///
/// # Example
/// ```
/// # use draughts::{perft, Game, Rules};
/// let mut game = Game::new(Rules::international());
/// assert_eq!(perft(&mut game, 2), 81);
/// ```
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.get_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        game.push(mv.clone());
        nodes += perft(game, depth - 1);
        game.pop().ok();
    }
    nodes
}

/// Like [`perft`], but reports the node count below each root move
/// separately, in generation order. Useful for pinpointing where two
/// generators disagree.
pub fn splitperft(game: &mut Game, depth: u32) -> Vec<(Move, u64)> {
    let mut counts = Vec::new();
    for mv in game.get_legal_moves() {
        game.push(mv.clone());
        let nodes = perft(game, depth.saturating_sub(1));
        game.pop().ok();
        counts.push((mv, nodes));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rules;

    #[test]
    fn test_perft_international() {
        let mut game = Game::new(Rules::international());
        for (depth, nodes) in [(1, 9), (2, 81), (3, 658), (4, 4265)] {
            assert_eq!(perft(&mut game, depth), nodes, "depth {depth}");
        }
        // Unwinding left the game untouched.
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_perft_english() {
        let mut game = Game::new(Rules::english());
        for (depth, nodes) in [(1, 7), (2, 49), (3, 302), (4, 1469), (5, 7361)] {
            assert_eq!(perft(&mut game, depth), nodes, "depth {depth}");
        }
    }

    #[test]
    fn test_splitperft_sums_to_perft() {
        let mut game = Game::new(Rules::international());
        let split = splitperft(&mut game, 3);
        assert_eq!(split.len(), 9);
        let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, perft(&mut game, 3));
    }
}
