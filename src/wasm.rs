//! Event-driven adapter for the browser.
//!
//! JS owns a [`WebGame`] and calls into it once per UI event. Every call
//! returns the UI events to apply, serialized with `serde-wasm-bindgen`.

use std::io;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::config::{ConfiguredEngine, EngineConfig, Strategy};
use crate::game::{Input, Orchestrator};
use crate::presenter::{Presenter, dispatch};
use crate::types::{Color, Coord, GameView, Score};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// A notification in the shape the page consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiEvent {
    /// `cells` is top row first: 0=empty, 1=black, 2=white.
    Render { cells: Vec<u8>, score: Option<Score> },
    Message { text: String },
    GameOver { text: String },
    ShowColorPrompt,
}

#[derive(Default)]
struct EventLog(Vec<UiEvent>);

impl Presenter<Board> for EventLog {
    fn on_render(&mut self, field: &Board, score: Option<Score>) {
        self.0.push(UiEvent::Render {
            cells: field.to_array().to_vec(),
            score,
        });
    }

    fn on_message(&mut self, text: &str) {
        self.0.push(UiEvent::Message {
            text: text.to_string(),
        });
    }

    fn on_game_over(&mut self, result: &str) {
        self.0.push(UiEvent::GameOver {
            text: result.to_string(),
        });
    }

    fn on_show_color_prompt(&mut self) {
        self.0.push(UiEvent::ShowColorPrompt);
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Orchestrator<ConfiguredEngine>,
}

#[wasm_bindgen]
impl WebGame {
    /// Greedy opponent; `seed` fixes its tie-breaks.
    ///
    /// The game starts out waiting for a color but emits nothing. Call
    /// `reset()` first to get the opening render and the color prompt.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebGame {
        let config = EngineConfig {
            strategy: Strategy::Greedy,
            seed,
        };
        WebGame {
            game: Orchestrator::new(config.build()),
        }
    }

    /// `symbol` is `"O"` for white or `"#"` for black.
    #[wasm_bindgen(js_name = selectColor)]
    pub fn select_color(&mut self, symbol: &str) -> Result<JsValue, JsError> {
        let color = parse_symbol(symbol)
            .ok_or_else(|| JsError::new(&format!("unknown color symbol {symbol:?}")))?;
        to_js(&self.events(Input::SelectColor(color)))
    }

    #[wasm_bindgen(js_name = moveTo)]
    pub fn move_to(&mut self, x: u8, y: u8) -> Result<JsValue, JsError> {
        to_js(&self.events(Input::SubmitMove(Coord::new(x, y))))
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.events(Input::Reset))
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.view())
    }
}

impl WebGame {
    pub fn events(&mut self, input: Input) -> Vec<UiEvent> {
        debug!(?input, "ui event");
        let notes = self.game.handle(input);
        let mut log = EventLog::default();
        dispatch(&notes, &mut log);
        log.0
    }

    pub fn view(&self) -> GameView {
        let sides = self.game.sides();
        GameView {
            board: self.game.field().to_array().to_vec(),
            field: self.game.field().serialize(),
            phase: self.game.phase().name(),
            human: sides.map(|s| s.human),
            computer: sides.map(|s| s.computer),
            score: self.game.score(),
            is_game_over: self.game.is_game_over(),
        }
    }
}

fn parse_symbol(symbol: &str) -> Option<Color> {
    let mut chars = symbol.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Color::from_symbol(c),
        _ => None,
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

#[wasm_bindgen(js_name = whiteSymbol)]
pub fn white_symbol() -> String {
    Color::White.symbol().to_string()
}

#[wasm_bindgen(js_name = blackSymbol)]
pub fn black_symbol() -> String {
    Color::Black.symbol().to_string()
}

/// Buffers one formatted record and hands it to `console.log`.
#[derive(Default)]
struct ConsoleWriter(Vec<u8>);

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.0);
        let text = text.trim_end();
        if !text.is_empty() {
            log(text);
        }
    }
}

static LOGGING: OnceCell<()> = OnceCell::new();

/// Routes `tracing` output to the browser console. Later calls are no-ops.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(verbose: bool) {
    LOGGING.get_or_init(|| {
        let level = if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .without_time()
            .with_writer(ConsoleWriter::default)
            .try_init();
    });
}
