/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use crate::{
    Board, Color, Direction, MidChainPromotion, Move, Piece, PieceKind, Position, Rules, Square,
    MAX_CHAIN,
};

/// A list of legal [`Move`]s.
///
/// Grows on the heap: the number of distinct capture paths has no useful
/// bound, since a flying king facing a lattice of men branches at every
/// jump. Only the squares within one move are capped (see
/// [`MAX_CHAIN`]).
pub type MoveList = Vec<Move>;

/// Computes all legal moves in `position` under `rules`.
///
/// Always computed fresh; nothing is cached between calls. The result order
/// is deterministic: pieces by ascending square, directions in
/// [`Direction::ALL`] order, capture chains depth-first, and (when quiet
/// moves are legal alongside captures) captures first. An empty result means
/// the side to move has lost; it is never an error.
pub fn compute_legal_moves(position: &Position, rules: &Rules) -> MoveList {
    let color = position.side_to_move();

    let mut moves = MoveList::new();
    for (square, piece) in position.board().pieces_of(color) {
        let finder = ChainFinder { board: position.board(), rules, color, origin: square };
        let mut path = ArrayVec::new();
        path.push(square);
        finder.extend_chain(
            square,
            piece.kind(),
            false,
            0,
            &mut path,
            &mut ArrayVec::new(),
            &mut moves,
        );
    }

    if rules.must_capture_maximum() {
        if let Some(best) = moves.iter().map(Move::num_captured).max() {
            moves.retain(|mv| mv.num_captured() == best);
        }
    }

    if !moves.is_empty() && rules.forced_capture() {
        return moves;
    }

    push_quiet_moves(position, rules, &mut moves);
    moves
}

/// Depth-first enumeration of capture chains for one piece.
///
/// Pieces already jumped in the current chain are carried in a by-value
/// square mask: they cannot be captured a second time, and they no longer
/// block movement. The chain's origin square counts as empty, since the
/// moving piece has vacated it.
struct ChainFinder<'a> {
    board: &'a Board,
    rules: &'a Rules,
    color: Color,
    origin: Square,
}

impl ChainFinder<'_> {
    /// The piece effectively on `square` mid-chain, if any.
    #[inline(always)]
    fn occupant(&self, square: Square, pending: u128) -> Option<Piece> {
        if square == self.origin || pending & (1 << square.index()) != 0 {
            return None;
        }
        self.board.piece_at(square)
    }

    /// Tries every jump from `current`, recursing per landing square, and
    /// records the accumulated chain when no jump extends it further.
    /// Returns `true` if at least one jump was available.
    fn extend_chain(
        &self,
        current: Square,
        kind: PieceKind,
        promoted: bool,
        pending: u128,
        path: &mut ArrayVec<Square, MAX_CHAIN>,
        captured: &mut ArrayVec<(Square, Piece), MAX_CHAIN>,
        out: &mut MoveList,
    ) -> bool {
        let size = self.rules.size();
        let all = Direction::ALL;
        let forward = Direction::forward(self.color);
        let dirs: &[Direction] =
            if kind == PieceKind::King || self.rules.men_capture_backward() {
                &all
            } else {
                &forward
            };

        let mut extended = false;
        for &dir in dirs {
            if kind == PieceKind::King && self.rules.flying_kings() {
                // First effective occupant along the diagonal; an enemy there
                // can be jumped to any empty square beyond it.
                let mut scan = current;
                let mut target = None;
                while let Some(next) = scan.offset(dir, size) {
                    scan = next;
                    if let Some(piece) = self.occupant(scan, pending) {
                        if piece.color() != self.color {
                            target = Some((scan, piece));
                        }
                        break;
                    }
                }
                let Some((over, piece)) = target else {
                    continue;
                };
                let mut landing = over;
                while let Some(next) = landing.offset(dir, size) {
                    landing = next;
                    if self.occupant(landing, pending).is_some() {
                        break;
                    }
                    extended = true;
                    self.jump(over, piece, landing, kind, promoted, pending, path, captured, out);
                }
            } else {
                let Some(over) = current.offset(dir, size) else {
                    continue;
                };
                let Some(piece) = self.occupant(over, pending) else {
                    continue;
                };
                if piece.color() == self.color {
                    continue;
                }
                let Some(landing) = over.offset(dir, size) else {
                    continue;
                };
                if self.occupant(landing, pending).is_some() {
                    continue;
                }
                extended = true;
                self.jump(over, piece, landing, kind, promoted, pending, path, captured, out);
            }
        }

        if !extended && !captured.is_empty() {
            let leaf = path[path.len() - 1];
            let promotion = promoted
                || (kind == PieceKind::Man && leaf.row(size) == self.rules.back_rank(self.color));
            out.push(Move::capture(path.clone(), captured.clone(), promotion));
        }
        extended
    }

    /// Performs one jump over `over` to `landing`, applying the mid-chain
    /// promotion policy before recursing.
    #[allow(clippy::too_many_arguments)]
    fn jump(
        &self,
        over: Square,
        piece: Piece,
        landing: Square,
        kind: PieceKind,
        promoted: bool,
        pending: u128,
        path: &mut ArrayVec<Square, MAX_CHAIN>,
        captured: &mut ArrayVec<(Square, Piece), MAX_CHAIN>,
        out: &mut MoveList,
    ) {
        let pending = pending | (1 << over.index());
        path.push(landing);
        captured.push((over, piece));

        let at_back_rank = kind == PieceKind::Man
            && landing.row(self.rules.size()) == self.rules.back_rank(self.color);

        match (at_back_rank, self.rules.midchain_promotion()) {
            // Promotion ends the chain, even with jumps still available.
            (true, MidChainPromotion::Stop) => {
                out.push(Move::capture(path.clone(), captured.clone(), true));
            }
            // Promote in place and keep jumping with king movement.
            (true, MidChainPromotion::Continue) => {
                self.extend_chain(landing, PieceKind::King, true, pending, path, captured, out);
            }
            // Either not on the back rank, or the man passes over it and only
            // promotes if the chain happens to end there.
            _ => {
                self.extend_chain(landing, kind, promoted, pending, path, captured, out);
            }
        }

        path.pop();
        captured.pop();
    }
}

fn push_quiet_moves(position: &Position, rules: &Rules, out: &mut MoveList) {
    let color = position.side_to_move();
    let board = position.board();
    let size = rules.size();

    for (square, piece) in board.pieces_of(color) {
        if piece.is_man() {
            for dir in Direction::forward(color) {
                if let Some(to) = square.offset(dir, size) {
                    if board.is_empty(to) {
                        let promotion = to.row(size) == rules.back_rank(color);
                        out.push(Move::quiet(square, to, promotion));
                    }
                }
            }
        } else if rules.flying_kings() {
            for dir in Direction::ALL {
                let mut to = square;
                while let Some(next) = to.offset(dir, size) {
                    if !board.is_empty(next) {
                        break;
                    }
                    to = next;
                    out.push(Move::quiet(square, to, false));
                }
            }
        } else {
            for dir in Direction::ALL {
                if let Some(to) = square.offset(dir, size) {
                    if board.is_empty(to) {
                        out.push(Move::quiet(square, to, false));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn moves_of(fen: &str, rules: &Rules) -> Vec<String> {
        let position = Position::from_fen(fen, rules).unwrap();
        compute_legal_moves(&position, rules).iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn test_international_opening_moves() {
        let rules = Rules::international();
        let position = Position::new(&rules);
        let moves: Vec<String> =
            compute_legal_moves(&position, &rules).iter().map(|mv| mv.to_string()).collect();
        assert_eq!(
            moves,
            ["31-26", "31-27", "32-27", "32-28", "33-28", "33-29", "34-29", "34-30", "35-30"]
        );
    }

    #[test]
    fn test_english_opening_moves() {
        let rules = Rules::english();
        let position = Position::new(&rules);
        let moves: Vec<String> =
            compute_legal_moves(&position, &rules).iter().map(|mv| mv.to_string()).collect();
        assert_eq!(moves, ["21-17", "22-17", "22-18", "23-18", "23-19", "24-19", "24-20"]);
    }

    #[test]
    fn test_forced_capture_excludes_quiet_moves() {
        let rules = Rules::english();
        assert_eq!(moves_of("W:W22:B18", &rules), ["22x15"]);

        // Without the forcing rule the quiet step is legal too.
        let relaxed = Rules::custom("relaxed", 8, false, false, false, false,
            MidChainPromotion::Stop)
        .unwrap();
        assert_eq!(moves_of("W:W22:B18", &relaxed), ["22x15", "22-17"]);
    }

    #[test]
    fn test_men_capture_backward_is_variant_dependent() {
        // The black man sits behind the white one; only backward-capturing
        // variants may take it.
        let english = Rules::english();
        assert_eq!(moves_of("W:W15:B19", &english), ["15-10", "15-11"]);

        let backward = Rules::custom("backward", 8, false, true, false, true,
            MidChainPromotion::Stop)
        .unwrap();
        assert_eq!(moves_of("W:W15:B19", &backward), ["15x24"]);
    }

    #[test]
    fn test_maximal_capture_rule() {
        let rules = Rules::international();
        // A three-piece chain northwest and a two-piece chain northeast.
        let fen = "W:W48:B21,31,34,42,43";
        assert_eq!(moves_of(fen, &rules), ["48x37x26x17"]);

        let relaxed =
            Rules::custom("no-majority", 10, true, true, false, true, MidChainPromotion::Skip)
                .unwrap();
        assert_eq!(moves_of(fen, &relaxed), ["48x37x26x17", "48x39x30"]);
    }

    #[test]
    fn test_flying_king_slides() {
        let rules = Rules::international();
        assert_eq!(
            moves_of("W:WK28:B", &rules),
            [
                "28-22", "28-17", "28-11", "28-6", // northwest
                "28-23", "28-19", "28-14", "28-10", "28-5", // northeast
                "28-32", "28-37", "28-41", "28-46", // southwest
                "28-33", "28-39", "28-44", "28-50", // southeast
            ]
        );

        // Short-range kings step one square.
        let rules = Rules::english();
        assert_eq!(moves_of("W:WK14:B", &rules), ["14-9", "14-10", "14-17", "14-18"]);
    }

    #[test]
    fn test_flying_king_captures_at_distance() {
        let rules = Rules::international();
        assert_eq!(
            moves_of("W:WK46:B32", &rules),
            ["46x28", "46x23", "46x19", "46x14", "46x10", "46x5"]
        );
    }

    #[test]
    fn test_midchain_promotion_policies() {
        // A white man one jump from the back rank, with a second capture
        // available only after crossing it.
        let fen = "W:W11:B6,7";
        let custom = |policy, backward| {
            Rules::custom("policy", 8, false, true, false, backward, policy).unwrap()
        };

        // Stop: reaching the back rank promotes and ends the chain.
        let rules = custom(MidChainPromotion::Stop, false);
        let position = Position::from_fen(fen, &rules).unwrap();
        let moves = compute_legal_moves(&position, &rules);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "11x2");
        assert!(moves[0].is_promotion());

        // Continue: the man promotes mid-chain and keeps jumping as a king.
        let rules = custom(MidChainPromotion::Continue, false);
        let position = Position::from_fen(fen, &rules).unwrap();
        let moves = compute_legal_moves(&position, &rules);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "11x2x9");
        assert!(moves[0].is_promotion());

        // Skip: the man passes over the back rank and stays a man.
        let rules = custom(MidChainPromotion::Skip, true);
        let position = Position::from_fen(fen, &rules).unwrap();
        let moves = compute_legal_moves(&position, &rules);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "11x2x9");
        assert!(!moves[0].is_promotion());
    }

    #[test]
    fn test_crowded_endgame_has_exactly_two_captures() {
        let rules = Rules::international();
        let fen = "W:W4,11,28,31,K33,K34,38,40,K41,43,K44,45,K46,47:BK3,21,27,32";
        assert_eq!(moves_of(fen, &rules), ["28x37", "31x22"]);
    }

    #[test]
    fn test_dense_capture_lattice_generates_unbounded() {
        // A flying king facing a lattice of men branches at every jump, so
        // the raw capture-path count runs well past any inline capacity.
        let fen = "W:WK41:B7,8,9,17,18,19,27,28,29,37,38,39";
        let relaxed =
            Rules::custom("lattice", 10, true, true, false, true, MidChainPromotion::Skip)
                .unwrap();
        let position = Position::from_fen(fen, &relaxed).unwrap();
        let moves = compute_legal_moves(&position, &relaxed);
        assert!(moves.len() > 512, "only {} capture paths", moves.len());
        assert!(moves.iter().all(Move::is_capture));

        // The majority rule then prunes to the tied-longest chains.
        let rules = Rules::international();
        let position = Position::from_fen(fen, &rules).unwrap();
        let moves = compute_legal_moves(&position, &rules);
        assert!(!moves.is_empty());
        let best = moves.iter().map(Move::num_captured).max().unwrap();
        assert!(moves.iter().all(|mv| mv.num_captured() == best));
    }

    #[test]
    fn test_no_moves_for_blocked_side() {
        let rules = Rules::english();
        // The black man on 28 is wedged in the corner behind a white king.
        let position = Position::from_fen("B:WK32:B28", &rules).unwrap();
        assert!(compute_legal_moves(&position, &rules).is_empty());
        assert_eq!(position.side_to_move(), Color::Black);
    }
}
