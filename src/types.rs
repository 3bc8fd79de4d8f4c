use std::fmt;

use serde::Serialize;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;

/// Disc color. `White` is the light side and opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Board symbol used in the serialized field and text rendering.
    pub fn symbol(self) -> char {
        match self {
            Self::White => 'O',
            Self::Black => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'O' => Some(Self::White),
            '#' => Some(Self::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A 1-based board coordinate. `y = 1` is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (1..=BOARD_SIZE).contains(&self.x) && (1..=BOARD_SIZE).contains(&self.y)
    }

    pub fn is_corner(self) -> bool {
        self.in_bounds()
            && (self.x == 1 || self.x == BOARD_SIZE)
            && (self.y == 1 || self.y == BOARD_SIZE)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// The two colors bound at color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sides {
    pub human: Color,
    pub computer: Color,
}

/// Disc counts seen from the human's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub human: u8,
    pub computer: u8,
}

impl Score {
    /// Splits `(black, white)` engine counts by side.
    pub fn from_counts((black, white): (u8, u8), sides: Sides) -> Self {
        match sides.human {
            Color::Black => Self {
                human: black,
                computer: white,
            },
            Color::White => Self {
                human: white,
                computer: black,
            },
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.human.cmp(&self.computer) {
            std::cmp::Ordering::Greater => Outcome::HumanWin,
            std::cmp::Ordering::Less => Outcome::ComputerWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score Player vs Computer -- {}:{}", self.human, self.computer)
    }
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    HumanWin,
    ComputerWin,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::HumanWin => "Player WINS",
            Self::ComputerWin => "Computer WINS",
            Self::Draw => "DRAW",
        };
        f.write_str(text)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// 64 cells, top row first: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// Same board as 64 symbols: `O` white, `#` black, space empty.
    pub field: String,
    pub phase: &'static str,
    pub human: Option<Color>,
    pub computer: Option<Color>,
    pub score: Option<Score>,
    pub is_game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involutive() {
        for color in [Color::White, Color::Black] {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn symbols_round_trip() {
        assert_eq!(Color::from_symbol('O'), Some(Color::White));
        assert_eq!(Color::from_symbol('#'), Some(Color::Black));
        assert_eq!(Color::from_symbol(' '), None);
        assert_eq!(Color::Black.to_string(), "#");
    }

    #[test]
    fn coord_bounds_and_corners() {
        assert!(Coord::new(1, 1).in_bounds());
        assert!(Coord::new(8, 8).in_bounds());
        assert!(!Coord::new(0, 4).in_bounds());
        assert!(!Coord::new(9, 1).in_bounds());

        assert!(Coord::new(1, 8).is_corner());
        assert!(Coord::new(8, 1).is_corner());
        assert!(!Coord::new(1, 4).is_corner());
        assert!(!Coord::new(9, 9).is_corner());
    }

    #[test]
    fn score_maps_to_exactly_three_outcomes() {
        let black_human = Sides {
            human: Color::Black,
            computer: Color::White,
        };
        let white_human = Sides {
            human: Color::White,
            computer: Color::Black,
        };

        let score = Score::from_counts((40, 24), black_human);
        assert_eq!(score, Score { human: 40, computer: 24 });
        assert_eq!(score.outcome(), Outcome::HumanWin);

        let score = Score::from_counts((40, 24), white_human);
        assert_eq!(score.outcome(), Outcome::ComputerWin);

        let score = Score::from_counts((32, 32), white_human);
        assert_eq!(score.outcome(), Outcome::Draw);
        assert_eq!(score.to_string(), "Score Player vs Computer -- 32:32");
    }
}
