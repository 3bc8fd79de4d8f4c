use fastrand::Rng;
use tracing::trace;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::MoveSelector;
use crate::board::{Board, mask_to_positions, pos_to_coord};
use crate::types::Color;

/// One-ply greedy opponent.
///
/// Corners win outright. Moves that hand the opponent a corner reply are
/// skipped unless every move does. Among what is left the largest flip
/// count wins, and equal candidates are drawn at random.
#[derive(Debug, Clone)]
pub struct GreedySelector {
    rng: Rng,
}

impl GreedySelector {
    /// Seeds from the wall clock.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// All moves sharing the best rank, lowest index first.
    pub fn best_moves(board: &Board, color: Color) -> Vec<usize> {
        let moves = mask_to_positions(board.legal_moves(color));
        let safe = rank(board, color, &moves, true);
        if safe.is_empty() {
            rank(board, color, &moves, false)
        } else {
            safe
        }
    }
}

impl Default for GreedySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for GreedySelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<usize> {
        let best = Self::best_moves(board, color);
        if best.is_empty() {
            return None;
        }
        let idx = self.rng.usize(..best.len());
        trace!(options = best.len(), selected = idx, "greedy move choice");
        Some(best[idx])
    }
}

fn rank(board: &Board, color: Color, moves: &[usize], avoid_corner_replies: bool) -> Vec<usize> {
    let mut best = Vec::new();
    let mut best_key = (false, 0u32);

    for &mv in moves {
        if avoid_corner_replies && gives_corner(board, color, mv) {
            continue;
        }
        let key = (pos_to_coord(mv).is_corner(), board.flip_count(mv, color));
        if best.is_empty() || key > best_key {
            best_key = key;
            best = vec![mv];
        } else if key == best_key {
            best.push(mv);
        }
    }

    best
}

fn gives_corner(board: &Board, color: Color, mv: usize) -> bool {
    let mut next = *board;
    let _ = next.place(mv, color);
    mask_to_positions(next.legal_moves(color.opposite()))
        .into_iter()
        .any(|reply| pos_to_coord(reply).is_corner())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
