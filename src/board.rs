use std::fmt;
use std::str::FromStr;

use crate::error::FieldParseError;
use crate::types::{BOARD_SIZE, Color, Coord};

const WIDTH: usize = BOARD_SIZE as usize;
pub const NUM_SQUARES: usize = WIDTH * WIDTH;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state represented by two bitboards.
///
/// Bit `pos` is row `pos / 8` from the top and column `pos % 8` from the
/// left, so bit 0 is the coordinate (1, 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// black on (4,4) and (5,5), white on (4,5) and (5,4).
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "a square cannot hold two discs");
        Self { black, white }
    }

    /// Returns the disc on `coord`, if any.
    pub fn cell(&self, coord: Coord) -> Option<Color> {
        let square = bit(coord_to_pos(coord)?);
        if self.black & square != 0 {
            Some(Color::Black)
        } else if self.white & square != 0 {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, color: Color) -> u64 {
        let (me, opp) = self.sides(color);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Number of discs `color` would flip by playing `pos`. Zero when illegal.
    pub fn flip_count(&self, pos: usize, color: Color) -> u32 {
        let (me, opp) = self.sides(color);
        collect_flips(pos, me, opp).count_ones()
    }

    /// Places one disc and flips captured discs.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, pos: usize, color: Color) -> u64 {
        let (me, opp) = self.sides(color);

        let flips = collect_flips(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match color {
            Color::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Color::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Mask of every square holding a disc.
    pub fn occupied(&self) -> u64 {
        self.black | self.white
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.black & square) != 0 {
                1
            } else if (self.white & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }

    /// 64-symbol form: top row first, `O` white, `#` black, space empty.
    pub fn serialize(&self) -> String {
        (0..NUM_SQUARES).map(|pos| self.symbol_at(pos)).collect()
    }

    fn symbol_at(&self, pos: usize) -> char {
        let square = bit(pos);
        if self.black & square != 0 {
            Color::Black.symbol()
        } else if self.white & square != 0 {
            Color::White.symbol()
        } else {
            ' '
        }
    }

    fn sides(&self, color: Color) -> (u64, u64) {
        match color {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the 64-symbol form. Line breaks are skipped and `.` also
/// counts as empty, so a board can be written as eight lines.
impl FromStr for Board {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cells.len() != NUM_SQUARES {
            return Err(FieldParseError::WrongLength {
                expected: NUM_SQUARES,
                found: cells.len(),
            });
        }

        let mut black = 0u64;
        let mut white = 0u64;
        for (index, &symbol) in cells.iter().enumerate() {
            match symbol {
                ' ' | '.' => {}
                _ => match Color::from_symbol(symbol) {
                    Some(Color::Black) => black |= bit(index),
                    Some(Color::White) => white |= bit(index),
                    None => return Err(FieldParseError::UnknownSymbol { symbol, index }),
                },
            }
        }

        Ok(Self { black, white })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: String = (1..=BOARD_SIZE).map(|x| format!(" {x}")).collect();
        let rule = "-".repeat(WIDTH * 2 + 1);

        writeln!(f, "   {labels}")?;
        writeln!(f, "   +{rule}+")?;
        for row in 0..WIDTH {
            let y = WIDTH - row;
            write!(f, " {y} |")?;
            for col in 0..WIDTH {
                let symbol = match self.symbol_at(row * WIDTH + col) {
                    ' ' => '.',
                    other => other,
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f, " | {y}")?;
        }
        writeln!(f, "   +{rule}+")?;
        write!(f, "   {labels}")
    }
}

/// Maps a 1-based coordinate to its bit index, or `None` off the board.
pub fn coord_to_pos(coord: Coord) -> Option<usize> {
    if !coord.in_bounds() {
        return None;
    }
    let row = (BOARD_SIZE - coord.y) as usize;
    let col = (coord.x - 1) as usize;
    Some(row * WIDTH + col)
}

pub fn pos_to_coord(pos: usize) -> Coord {
    debug_assert!(pos < NUM_SQUARES);
    let (row, col) = (pos / WIDTH, pos % WIDTH);
    Coord::new(col as u8 + 1, BOARD_SIZE - row as u8)
}

/// Bit indices set in `mask`, lowest first.
pub fn mask_to_positions(mut mask: u64) -> Vec<usize> {
    let mut out = Vec::new();
    while mask != 0 {
        out.push(mask.trailing_zeros() as usize);
        mask &= mask - 1;
    }
    out
}

fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let (row, col) = ((pos / WIDTH) as i32, (pos % WIDTH) as i32);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * WIDTH + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else {
                if (me & square) != 0 {
                    flips |= line;
                }
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..WIDTH as i32).contains(&row) && (0..WIDTH as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> usize {
        coord_to_pos(Coord::new(x, y)).unwrap()
    }

    #[test]
    fn initial_layout_matches_standard_start() {
        let board = Board::new();

        assert_eq!(board.cell(Coord::new(4, 4)), Some(Color::Black));
        assert_eq!(board.cell(Coord::new(5, 5)), Some(Color::Black));
        assert_eq!(board.cell(Coord::new(4, 5)), Some(Color::White));
        assert_eq!(board.cell(Coord::new(5, 4)), Some(Color::White));
        assert_eq!(board.cell(Coord::new(1, 1)), None);
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.occupied().count_ones(), 4);
    }

    #[test]
    fn initial_white_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(pos(4, 3)) | bit(pos(3, 4)) | bit(pos(6, 5)) | bit(pos(5, 6));

        assert_eq!(board.legal_moves(Color::White), expected);
    }

    #[test]
    fn place_flips_opponent_discs_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(pos(4, 3), Color::White);

        assert_eq!(flips, bit(pos(4, 4)));
        assert_eq!(board.count(), (1, 4));
        assert_eq!(board.cell(Coord::new(4, 3)), Some(Color::White));
        assert_eq!(board.cell(Coord::new(4, 4)), Some(Color::White));
        assert_eq!(board.cell(Coord::new(5, 5)), Some(Color::Black));
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(pos(1, 1), Color::Black);

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn flips_along_several_lines_at_once() {
        let board: Board = "\
            ........\
            ........\
            ........\
            ...#....\
            ...#O...\
            ...#O...\
            ........\
            ........"
            .parse()
            .unwrap();

        assert_eq!(board.flip_count(pos(6, 3), Color::Black), 2);
        assert_eq!(board.flip_count(pos(6, 4), Color::Black), 1);
        assert_eq!(board.flip_count(pos(6, 6), Color::Black), 0);
    }

    #[test]
    fn edge_line_without_closing_disc_is_not_a_capture() {
        let board: Board = "\
            .#######\
            ........\
            ........\
            ........\
            ........\
            ........\
            ........\
            ........"
            .parse()
            .unwrap();

        assert_eq!(board.legal_moves(Color::White), 0);
        assert_eq!(board.legal_moves(Color::Black), 0);
    }

    #[test]
    fn coordinates_map_top_row_first() {
        assert_eq!(coord_to_pos(Coord::new(1, 8)), Some(0));
        assert_eq!(coord_to_pos(Coord::new(8, 1)), Some(63));
        assert_eq!(coord_to_pos(Coord::new(9, 1)), None);
        assert_eq!(coord_to_pos(Coord::new(0, 0)), None);
        for p in 0..NUM_SQUARES {
            assert_eq!(coord_to_pos(pos_to_coord(p)), Some(p));
        }
    }

    #[test]
    fn serialized_field_reads_back() {
        let mut board = Board::new();
        let _ = board.place(pos(4, 3), Color::White);

        let text = board.serialize();
        assert_eq!(text.len(), NUM_SQUARES);
        assert_eq!(&text[24..40], "   O#      OO   ");
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn malformed_field_is_rejected() {
        assert_eq!(
            "O#".parse::<Board>(),
            Err(FieldParseError::WrongLength {
                expected: 64,
                found: 2
            })
        );

        let mut text = " ".repeat(63);
        text.push('x');
        assert_eq!(
            text.parse::<Board>(),
            Err(FieldParseError::UnknownSymbol {
                symbol: 'x',
                index: 63
            })
        );
    }

    #[test]
    fn display_labels_rows_from_the_top() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "    1 2 3 4 5 6 7 8");
        assert_eq!(lines[2], " 8 | . . . . . . . . | 8");
        assert_eq!(lines[5], " 5 | . . . O # . . . | 5");
        assert_eq!(lines[6], " 4 | . . . # O . . . | 4");
    }

    #[test]
    fn mask_positions_are_ascending() {
        assert_eq!(mask_to_positions(0), Vec::<usize>::new());
        assert_eq!(mask_to_positions(bit(3) | bit(0) | bit(63)), vec![0, 3, 63]);
    }
}
