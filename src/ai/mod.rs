//! Move selection for the automated opponent.

mod greedy;

pub use greedy::GreedySelector;

use std::fmt::Debug;

use crate::board::Board;
use crate::types::Color;

/// Picks a bit index to play for `color`. Returns `None` only when
/// `color` has no legal move on `board`.
pub trait MoveSelector: Debug {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<usize>;
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<usize> {
        (**self).select_move(board, color)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<usize> {
        let legal = board.legal_moves(color);
        if legal == 0 {
            None
        } else {
            Some(legal.trailing_zeros() as usize)
        }
    }
}
