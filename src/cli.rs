//! Blocking command-line adapter.
//!
//! Reads one line per prompt and waits as long as it takes. Malformed
//! lines are answered with a message and the prompt repeats.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::error::{GameError, InputError};
use crate::game::{Orchestrator, Phase};
use crate::presenter::{Presenter, dispatch};
use crate::types::{Color, Coord, Score};

const COLOR_PROMPT: &str = "O - 1, # - 2 ? ";
const MOVE_PROMPT: &str = "Your turn (x y) > ";

/// Parses a color choice: `1`, `o` or `white` for white; `2`, `#` or
/// `black` for black.
pub fn parse_color(line: &str) -> Result<Color, InputError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "o" | "white" => Ok(Color::White),
        "2" | "#" | "black" => Ok(Color::Black),
        other => Err(InputError::UnknownColor {
            choice: other.to_string(),
        }),
    }
}

/// Parses `x y`. Range is left to the engine.
pub fn parse_coord(line: &str) -> Result<Coord, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[x, y] = tokens.as_slice() else {
        return Err(InputError::WrongArity {
            found: tokens.len(),
        });
    };
    let number = |token: &str| {
        token.parse::<u8>().map_err(|_| InputError::BadCoordinate {
            token: token.to_string(),
        })
    };
    Ok(Coord::new(number(x)?, number(y)?))
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

/// Writes notifications as plain text. The first write failure is kept
/// and later output is dropped.
pub struct TextPresenter<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn message(&mut self, text: &str) {
        self.emit(&text);
    }

    fn emit(&mut self, text: &dyn Display) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.error = Some(err);
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.check()?;
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    fn check(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<F: Display, W: Write> Presenter<F> for TextPresenter<W> {
    fn on_render(&mut self, field: &F, score: Option<Score>) {
        self.emit(field);
        if let Some(score) = score {
            self.emit(&score);
        }
        self.emit(&"");
    }

    fn on_message(&mut self, text: &str) {
        self.message(text);
    }

    fn on_game_over(&mut self, result: &str) {
        self.emit(&result);
    }

    fn on_show_color_prompt(&mut self) {
        self.emit(&"Choose your color (q to quit).");
    }
}

/// One terminal session; plays games until the user quits.
pub struct Session<E: Engine, R, W> {
    game: Orchestrator<E>,
    input: R,
    presenter: TextPresenter<W>,
    first_color: Option<Color>,
}

impl<E, R, W> Session<E, R, W>
where
    E: Engine,
    E::Field: Display,
    R: BufRead,
    W: Write,
{
    pub fn new(engine: E, input: R, output: W) -> Self {
        Self {
            game: Orchestrator::new(engine),
            input,
            presenter: TextPresenter::new(output),
            first_color: None,
        }
    }

    /// Answers the first color prompt without asking.
    pub fn with_first_color(mut self, color: Option<Color>) -> Self {
        self.first_color = color;
        self
    }

    pub fn game(&self) -> &Orchestrator<E> {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.presenter.into_inner()
    }

    /// Runs until the user quits or input ends at the color prompt. End
    /// of input in the middle of a game is [`GameError::InputClosed`].
    pub fn run(&mut self) -> Result<(), GameError> {
        let notes = self.game.reset();
        dispatch(&notes, &mut self.presenter);

        loop {
            self.presenter.check()?;
            let notes = match self.game.phase() {
                Phase::AwaitingColorSelection | Phase::Terminal => {
                    let Some(color) = self.read_color()? else {
                        return Ok(());
                    };
                    self.game.select_color(color)
                }
                Phase::PlayerTurn => {
                    let Some(coord) = self.read_move()? else {
                        return Ok(());
                    };
                    self.game.submit_move(coord)
                }
                Phase::ComputerTurn => unreachable!("computer turn is resolved within one call"),
            };
            dispatch(&notes, &mut self.presenter);
        }
    }

    fn read_color(&mut self) -> Result<Option<Color>, GameError> {
        if let Some(color) = self.first_color.take() {
            return Ok(Some(color));
        }
        loop {
            let line = match self.read_line(COLOR_PROMPT) {
                Ok(line) => line,
                Err(GameError::InputClosed) => return Ok(None),
                Err(err) => return Err(err),
            };
            if is_quit(&line) {
                return Ok(None);
            }
            match parse_color(&line) {
                Ok(color) => return Ok(Some(color)),
                Err(err) => {
                    debug!(%err, "color choice rejected");
                    self.presenter.message(&format!("Invalid input: {err}"));
                }
            }
        }
    }

    fn read_move(&mut self) -> Result<Option<Coord>, GameError> {
        loop {
            let line = self.read_line(MOVE_PROMPT)?;
            if is_quit(&line) {
                return Ok(None);
            }
            match parse_coord(&line) {
                Ok(coord) => return Ok(Some(coord)),
                Err(err) => self.presenter.message(&format!("Invalid input: {err}")),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, GameError> {
        self.presenter.prompt(prompt)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            warn!("input closed");
            return Err(GameError::InputClosed);
        }
        Ok(line)
    }
}
