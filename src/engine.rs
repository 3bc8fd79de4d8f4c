use std::fmt::Debug;

use tracing::debug;
use web_time::Instant;

use crate::ai::{FirstLegalMoveSelector, GreedySelector, MoveSelector};
use crate::board::{Board, coord_to_pos, pos_to_coord};
use crate::types::{Color, Coord};

/// Board rules the orchestrator drives the game through.
///
/// `Field` is opaque to callers: every changing call hands back a new
/// value instead of mutating the one passed in.
pub trait Engine {
    type Field: Clone + PartialEq + Debug;

    fn init_field(&self) -> Self::Field;

    /// Color that opens the game.
    fn first_mover(&self) -> Color;

    fn opposite(&self, color: Color) -> Color {
        color.opposite()
    }

    fn can_move(&self, color: Color, field: &Self::Field) -> bool;

    /// False for coordinates off the board.
    fn is_legal(&self, coord: Coord, color: Color, field: &Self::Field) -> bool;

    /// Caller contract: `is_legal(coord, color, field)` holds.
    fn apply_human_move(&self, coord: Coord, color: Color, field: &Self::Field) -> Self::Field;

    /// Chooses and plays exactly one move.
    /// Caller contract: `can_move(color, field)` holds.
    fn apply_automated_move(&mut self, color: Color, field: &Self::Field) -> Self::Field;

    /// Returns `(black_count, white_count)`.
    fn score(&self, field: &Self::Field) -> (u8, u8);

    fn is_valid_coordinate(&self, coord: Coord) -> bool;

    /// Text for the move that turned `before` into `after`, shown after
    /// "Player has moved to" or "Computer has moved to".
    fn describe_move(&self, _before: &Self::Field, _after: &Self::Field) -> Option<String> {
        None
    }
}

/// Reversi rules over [`Board`], with automated moves picked by `S`.
#[derive(Debug, Clone)]
pub struct ReversiEngine<S: MoveSelector = GreedySelector> {
    selector: S,
}

impl<S: MoveSelector> ReversiEngine<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }
}

impl ReversiEngine<FirstLegalMoveSelector> {
    pub fn first_legal() -> Self {
        Self::new(FirstLegalMoveSelector)
    }
}

impl<S: MoveSelector> Engine for ReversiEngine<S> {
    type Field = Board;

    fn init_field(&self) -> Board {
        Board::new()
    }

    fn first_mover(&self) -> Color {
        Color::White
    }

    fn can_move(&self, color: Color, field: &Board) -> bool {
        field.legal_moves(color) != 0
    }

    fn is_legal(&self, coord: Coord, color: Color, field: &Board) -> bool {
        match coord_to_pos(coord) {
            Some(pos) => field.legal_moves(color) & (1u64 << pos) != 0,
            None => false,
        }
    }

    fn apply_human_move(&self, coord: Coord, color: Color, field: &Board) -> Board {
        let pos = coord_to_pos(coord)
            .unwrap_or_else(|| unreachable!("apply_human_move called off the board at {coord}"));
        let mut next = *field;
        let flips = next.place(pos, color);
        assert_ne!(flips, 0, "apply_human_move called with illegal move {coord}");
        debug!(%color, %coord, flipped = flips.count_ones(), "human move applied");
        next
    }

    fn apply_automated_move(&mut self, color: Color, field: &Board) -> Board {
        let started = Instant::now();
        let Some(pos) = self.selector.select_move(field, color) else {
            unreachable!("apply_automated_move called without legal moves for {color}");
        };

        let mut next = *field;
        let flips = next.place(pos, color);
        assert_ne!(flips, 0, "move selector chose an illegal move");
        debug!(
            %color,
            coord = %pos_to_coord(pos),
            flipped = flips.count_ones(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "automated move applied"
        );
        next
    }

    fn score(&self, field: &Board) -> (u8, u8) {
        field.count()
    }

    fn is_valid_coordinate(&self, coord: Coord) -> bool {
        coord.in_bounds()
    }

    /// `x,y, +n score`, where `n` counts the placed disc and its flips.
    fn describe_move(&self, before: &Board, after: &Board) -> Option<String> {
        let placed = after.occupied() & !before.occupied();
        if placed.count_ones() != 1 {
            return None;
        }
        let coord = pos_to_coord(placed.trailing_zeros() as usize);
        let color = after.cell(coord)?;
        let discs = |board: &Board| match (color, board.count()) {
            (Color::Black, (black, _)) => black,
            (Color::White, (_, white)) => white,
        };
        let gain = discs(after).checked_sub(discs(before))?;
        Some(format!("{coord}, +{gain} score"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_total_and_involutive() {
        let engine = ReversiEngine::first_legal();
        for color in [Color::White, Color::Black] {
            assert_eq!(engine.opposite(engine.opposite(color)), color);
        }
    }

    #[test]
    fn white_opens_from_the_standard_layout() {
        let engine = ReversiEngine::first_legal();
        let field = engine.init_field();

        assert_eq!(engine.first_mover(), Color::White);
        assert_eq!(field, Board::new());
        assert!(engine.can_move(Color::White, &field));
        assert!(engine.can_move(Color::Black, &field));
        assert_eq!(engine.score(&field), (2, 2));
    }

    #[test]
    fn legality_rejects_off_board_and_occupied() {
        let engine = ReversiEngine::first_legal();
        let field = engine.init_field();

        assert!(engine.is_legal(Coord::new(4, 3), Color::White, &field));
        assert!(!engine.is_legal(Coord::new(4, 3), Color::Black, &field));
        assert!(!engine.is_legal(Coord::new(4, 4), Color::White, &field));
        assert!(!engine.is_legal(Coord::new(9, 1), Color::White, &field));
        assert!(!engine.is_legal(Coord::new(0, 3), Color::White, &field));
    }

    #[test]
    fn coordinate_check_ignores_field_state() {
        let engine = ReversiEngine::first_legal();

        assert!(engine.is_valid_coordinate(Coord::new(1, 1)));
        assert!(engine.is_valid_coordinate(Coord::new(8, 8)));
        assert!(!engine.is_valid_coordinate(Coord::new(9, 1)));
        assert!(!engine.is_valid_coordinate(Coord::new(1, 0)));
    }

    #[test]
    fn moves_return_new_fields() {
        let mut engine = ReversiEngine::first_legal();
        let start = engine.init_field();

        let after_human = engine.apply_human_move(Coord::new(4, 3), Color::White, &start);
        assert_eq!(start, Board::new());
        assert_eq!(engine.score(&after_human), (1, 4));

        let after_computer = engine.apply_automated_move(Color::Black, &after_human);
        assert_ne!(after_computer, after_human);
        assert_eq!(engine.score(&after_human), (1, 4));
        let (black, white) = engine.score(&after_computer);
        assert_eq!(black + white, 6);
        assert!(black >= 3);
    }

    #[test]
    fn describes_where_a_move_landed_and_what_it_gained() {
        let mut engine = ReversiEngine::first_legal();
        let start = engine.init_field();

        let after_human = engine.apply_human_move(Coord::new(4, 3), Color::White, &start);
        assert_eq!(
            engine.describe_move(&start, &after_human).as_deref(),
            Some("4,3, +2 score")
        );

        // black's first legal reply is (3,5), flipping (4,5)
        let after_computer = engine.apply_automated_move(Color::Black, &after_human);
        assert_eq!(
            engine.describe_move(&after_human, &after_computer).as_deref(),
            Some("3,5, +2 score")
        );

        assert_eq!(engine.describe_move(&start, &start), None);
        assert_eq!(engine.describe_move(&start, &after_computer), None);
    }

    #[test]
    #[should_panic]
    fn automated_move_without_legal_moves_is_a_contract_violation() {
        let mut engine = ReversiEngine::first_legal();
        let full = Board::from_bitboards(u64::MAX, 0);

        let _ = engine.apply_automated_move(Color::White, &full);
    }
}
