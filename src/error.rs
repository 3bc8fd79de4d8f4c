//! Error types.
//!
//! Gameplay rejections (illegal move, wrong turn) are not errors; the
//! orchestrator answers them with messages. These types cover malformed
//! text input and adapter-level failures.

use derive_more::{Display, Error, From};

/// A serialized field could not be read back into a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FieldParseError {
    #[display("field needs {expected} cells, got {found}")]
    WrongLength { expected: usize, found: usize },
    #[display("unknown cell symbol {symbol:?} at cell {index}")]
    UnknownSymbol { symbol: char, index: usize },
}

/// A line typed by the user did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    #[display("expected two numbers, got {found}")]
    WrongArity { found: usize },
    #[display("{token:?} is not a coordinate")]
    BadCoordinate { token: String },
    #[display("unknown color choice {choice:?}")]
    UnknownColor { choice: String },
}

/// Failure that ends a session.
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    #[display("i/o error: {_0}")]
    Io(std::io::Error),
    #[display("input closed")]
    #[from(ignore)]
    InputClosed,
    #[display("invalid input: {_0}")]
    Input(InputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = FieldParseError::WrongLength {
            expected: 64,
            found: 3,
        };
        assert_eq!(err.to_string(), "field needs 64 cells, got 3");

        let err = InputError::BadCoordinate {
            token: "a".to_string(),
        };
        assert_eq!(err.to_string(), "\"a\" is not a coordinate");

        let err: GameError = InputError::WrongArity { found: 1 }.into();
        assert_eq!(err.to_string(), "invalid input: expected two numbers, got 1");
    }
}
