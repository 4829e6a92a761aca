/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use log::info;

use crate::{Color, Game, GameOutcome, Move, MoveList, PieceKind, Position, Rules};

/// Score of a win at the root. Wins closer to the root score higher, so the
/// engine prefers the fastest win it can see.
pub const WIN_SCORE: i32 = 100_000;

const INFINITY: i32 = i32::MAX - 1;

/// How often the deadline clock is consulted, in nodes.
const DEADLINE_CHECK_INTERVAL: u64 = 2048;

/// A static position evaluator.
pub trait Evaluate {
    /// Scores `position` from the perspective of its side to move: positive
    /// means the side to move is better.
    fn evaluate(&self, position: &Position, rules: &Rules) -> i32;
}

/// Material count plus a small advancement bonus for men.
///
/// Kings are worth strictly more than men, and a man gains `advancement` per
/// row it has progressed toward promotion.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub man: i32,
    pub king: i32,
    pub advancement: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self { man: 100, king: 300, advancement: 4 }
    }
}

impl Evaluate for Material {
    fn evaluate(&self, position: &Position, rules: &Rules) -> i32 {
        let size = rules.size();
        let mut white_view = 0;
        for (square, piece) in position.board().pieces() {
            let value = match piece.kind() {
                PieceKind::King => self.king,
                PieceKind::Man => {
                    let advanced = match piece.color() {
                        Color::White => size - 1 - square.row(size),
                        Color::Black => square.row(size),
                    };
                    self.man + self.advancement * advanced as i32
                }
            };
            match piece.color() {
                Color::White => white_view += value,
                Color::Black => white_view -= value,
            }
        }
        match position.side_to_move() {
            Color::White => white_view,
            Color::Black => -white_view,
        }
    }
}

/// Bounds on a search: a maximum depth, and optional wall-clock and node
/// caps.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    depth: u32,
    deadline: Option<Instant>,
    nodes: Option<u64>,
}

impl SearchLimits {
    /// Limits a search to `depth` plies.
    pub fn new(depth: u32) -> Self {
        Self { depth: depth.max(1), deadline: None, nodes: None }
    }

    /// Consumes `self` and adds a wall-clock deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Consumes `self` and adds a node cap.
    pub fn with_node_cap(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self
    }
}

/// The best move found by a [`search`], with its score and the depth of the
/// deepest fully completed iteration.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The best move found.
    pub mv: Move,
    /// Score of `mv` from the root side to move's perspective.
    pub score: i32,
    /// Depth of the deepest iteration that ran to completion.
    pub depth: u32,
    /// Nodes visited in total, across all iterations.
    pub nodes: u64,
}

/// Searches `game` with iterative deepening negamax and alpha-beta pruning.
///
/// Returns `None` only if the side to move has no legal moves. The first
/// iteration always runs to completion, so a result is available even under
/// the tightest limits; when a limit trips mid-iteration, the partially
/// searched depth is discarded and the previous iteration's move is kept.
///
/// Equal scores keep the earlier move in generation order, so identical
/// inputs always produce identical results.
pub fn search<E: Evaluate>(
    game: &mut Game,
    evaluator: &E,
    limits: SearchLimits,
) -> Option<SearchResult> {
    let root_moves = game.get_legal_moves();
    if root_moves.is_empty() {
        return None;
    }

    let mut searcher = Searcher { game, evaluator, limits, nodes: 0, stopped: false, abortable: false };

    // Depth 1 ignores the limits so there is always a completed iteration.
    let (mv, score) = searcher.negamax_root(&root_moves, 1)?;
    let mut best = SearchResult { mv, score, depth: 1, nodes: searcher.nodes };
    info!("depth 1 score {} nodes {} best {}", best.score, best.nodes, best.mv);

    searcher.abortable = true;
    for depth in 2..=limits.depth {
        let Some((mv, score)) = searcher.negamax_root(&root_moves, depth) else {
            break;
        };
        best = SearchResult { mv, score, depth, nodes: searcher.nodes };
        info!("depth {depth} score {} nodes {} best {}", best.score, best.nodes, best.mv);
    }
    Some(best)
}

struct Searcher<'a, E> {
    game: &'a mut Game,
    evaluator: &'a E,
    limits: SearchLimits,
    nodes: u64,
    stopped: bool,
    abortable: bool,
}

impl<E: Evaluate> Searcher<'_, E> {
    /// Checks the node and deadline limits. Once tripped, stays tripped so
    /// the whole iteration unwinds.
    fn should_abort(&mut self) -> bool {
        if !self.abortable {
            return false;
        }
        if self.stopped {
            return true;
        }
        if self.limits.nodes.is_some_and(|cap| self.nodes >= cap) {
            self.stopped = true;
        } else if self.nodes % DEADLINE_CHECK_INTERVAL == 0
            && self.limits.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.stopped = true;
        }
        self.stopped
    }

    /// One full-width pass over the root moves. `None` means the iteration
    /// was aborted and its result must not be used.
    fn negamax_root(&mut self, moves: &MoveList, depth: u32) -> Option<(Move, i32)> {
        let mut alpha = -INFINITY;
        let mut best: Option<Move> = None;

        for mv in moves {
            self.game.push(mv.clone());
            let result = self.negamax(depth - 1, 1, -INFINITY, -alpha);
            self.game.pop().ok();
            let score = -result?;

            if best.is_none() || score > alpha {
                alpha = score;
                best = Some(mv.clone());
            }
        }
        best.map(|mv| (mv, alpha))
    }

    fn negamax(&mut self, depth: u32, ply: i32, mut alpha: i32, beta: i32) -> Option<i32> {
        self.nodes += 1;
        if self.should_abort() {
            return None;
        }

        match self.game.outcome() {
            GameOutcome::Draw(_) => return Some(0),
            // The side to move has no legal moves and loses.
            GameOutcome::Win(_) => return Some(ply - WIN_SCORE),
            GameOutcome::InProgress => {}
        }
        if depth == 0 {
            return Some(self.evaluator.evaluate(self.game.position(), self.game.rules()));
        }

        let moves = self.game.get_legal_moves();
        let mut best = -INFINITY;
        for mv in &moves {
            self.game.push(mv.clone());
            let result = self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.game.pop().ok();
            let score = -result?;

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        Some(best)
    }
}
