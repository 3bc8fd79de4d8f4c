//! Turn orchestration.
//!
//! [`Orchestrator`] is a state-transition function: each inbound call takes
//! the current state plus one input and returns the notifications the
//! adapter should show. Nothing is suspended between calls, so the same
//! instance serves a blocking prompt loop and a UI event loop alike.

use std::fmt;

use tracing::{debug, info};

use crate::engine::Engine;
use crate::types::{Color, Coord, Score, Sides};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingColorSelection,
    /// The human has a legal move and the orchestrator waits for it.
    PlayerTurn,
    /// Transient: resolved inside the call that entered it.
    ComputerTurn,
    Terminal,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::AwaitingColorSelection => "awaitingColorSelection",
            Self::PlayerTurn => "playerTurn",
            Self::ComputerTurn => "computerTurn",
            Self::Terminal => "terminal",
        }
    }
}

/// Inbound adapter events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    SelectColor(Color),
    SubmitMove(Coord),
    Reset,
}

/// Outbound side effects, in the order the adapter should apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<F> {
    Render { field: F, score: Option<Score> },
    Message(String),
    GameOver(String),
    ShowColorPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Human,
    Computer,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => f.write_str("Player"),
            Self::Computer => f.write_str("Computer"),
        }
    }
}

pub struct Orchestrator<E: Engine> {
    engine: E,
    phase: Phase,
    sides: Option<Sides>,
    field: E::Field,
    human_can_move: bool,
    computer_can_move: bool,
}

impl<E: Engine> Orchestrator<E> {
    pub fn new(engine: E) -> Self {
        let field = engine.init_field();
        Self {
            engine,
            phase: Phase::AwaitingColorSelection,
            sides: None,
            field,
            human_can_move: true,
            computer_can_move: true,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sides(&self) -> Option<Sides> {
        self.sides
    }

    pub fn field(&self) -> &E::Field {
        &self.field
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Current disc counts per side, once colors are bound.
    pub fn score(&self) -> Option<Score> {
        self.sides
            .map(|sides| Score::from_counts(self.engine.score(&self.field), sides))
    }

    pub fn handle(&mut self, input: Input) -> Vec<Notification<E::Field>> {
        match input {
            Input::SelectColor(color) => self.select_color(color),
            Input::SubmitMove(coord) => self.submit_move(coord),
            Input::Reset => self.reset(),
        }
    }

    /// Drops the current game and waits for a color choice.
    pub fn reset(&mut self) -> Vec<Notification<E::Field>> {
        debug!("reset");
        self.sides = None;
        self.field = self.engine.init_field();
        self.human_can_move = true;
        self.computer_can_move = true;
        self.phase = Phase::AwaitingColorSelection;
        vec![self.render(), Notification::ShowColorPrompt]
    }

    pub fn select_color(&mut self, color: Color) -> Vec<Notification<E::Field>> {
        let mut out = Vec::new();
        match self.phase {
            Phase::PlayerTurn | Phase::ComputerTurn => {
                out.push(Notification::Message("Game in progress".to_string()));
            }
            Phase::AwaitingColorSelection | Phase::Terminal => self.start(color, &mut out),
        }
        out
    }

    pub fn submit_move(&mut self, coord: Coord) -> Vec<Notification<E::Field>> {
        let mut out = Vec::new();
        let sides = match (self.phase, self.sides) {
            (Phase::PlayerTurn, Some(sides)) => sides,
            (Phase::Terminal, _) => {
                out.push(Notification::Message("Game over".to_string()));
                return out;
            }
            _ => {
                out.push(Notification::Message("Select color".to_string()));
                return out;
            }
        };

        if !self.engine.is_valid_coordinate(coord) {
            out.push(Notification::Message(format!("{coord} -- is off the board")));
            return out;
        }
        if !self.engine.is_legal(coord, sides.human, &self.field) {
            out.push(Notification::Message(format!("{coord} -- is not valid move")));
            return out;
        }

        let next = self.engine.apply_human_move(coord, sides.human, &self.field);
        let moved = self
            .engine
            .describe_move(&self.field, &next)
            .unwrap_or_else(|| coord.to_string());
        self.field = next;
        self.human_can_move = true;
        out.push(Notification::Message(format!("Player has moved to {moved}")));
        out.push(self.render());

        self.phase = Phase::ComputerTurn;
        self.run(sides, &mut out);
        out
    }

    fn start(&mut self, human: Color, out: &mut Vec<Notification<E::Field>>) {
        let sides = Sides {
            human,
            computer: self.engine.opposite(human),
        };
        info!(human = %sides.human, computer = %sides.computer, "new game");

        self.sides = Some(sides);
        self.field = self.engine.init_field();
        self.human_can_move = true;
        self.computer_can_move = true;
        out.push(self.render());

        if sides.computer == self.engine.first_mover()
            && self.engine.can_move(sides.computer, &self.field)
        {
            self.computer_move(sides, out);
        }

        self.phase = Phase::PlayerTurn;
        self.run(sides, out);
    }

    /// Advances through passes and computer moves until the human has to
    /// act or the game is over.
    fn run(&mut self, sides: Sides, out: &mut Vec<Notification<E::Field>>) {
        loop {
            match self.phase {
                Phase::PlayerTurn => {
                    if self.check_turn(sides, Side::Human, out) {
                        return;
                    }
                    self.phase = Phase::ComputerTurn;
                }
                Phase::ComputerTurn => {
                    self.computer_turn(sides, out);
                    if !self.human_can_move && !self.computer_can_move {
                        self.phase = Phase::Terminal;
                        self.finish(sides, out);
                        return;
                    }
                    self.phase = Phase::PlayerTurn;
                }
                Phase::AwaitingColorSelection | Phase::Terminal => return,
            }
        }
    }

    /// The computer keeps moving while the human stays blocked.
    fn computer_turn(&mut self, sides: Sides, out: &mut Vec<Notification<E::Field>>) {
        if !self.check_turn(sides, Side::Computer, out) {
            self.human_can_move = self.engine.can_move(sides.human, &self.field);
            return;
        }

        loop {
            self.computer_move(sides, out);

            self.human_can_move = self.engine.can_move(sides.human, &self.field);
            if self.human_can_move {
                return;
            }
            self.computer_can_move = self.engine.can_move(sides.computer, &self.field);
            if !self.computer_can_move {
                return;
            }
            debug!("player blocked, computer moves again");
        }
    }

    fn computer_move(&mut self, sides: Sides, out: &mut Vec<Notification<E::Field>>) {
        let next = self.engine.apply_automated_move(sides.computer, &self.field);
        if let Some(moved) = self.engine.describe_move(&self.field, &next) {
            out.push(Notification::Message(format!("Computer has moved to {moved}")));
        }
        self.field = next;
        out.push(self.render());
    }

    /// Queries whether `side` can move and records the answer. A blocked
    /// side passes.
    fn check_turn(
        &mut self,
        sides: Sides,
        side: Side,
        out: &mut Vec<Notification<E::Field>>,
    ) -> bool {
        let color = match side {
            Side::Human => sides.human,
            Side::Computer => sides.computer,
        };
        let can_move = self.engine.can_move(color, &self.field);
        match side {
            Side::Human => self.human_can_move = can_move,
            Side::Computer => self.computer_can_move = can_move,
        }
        if !can_move {
            debug!(%side, %color, "pass");
            out.push(Notification::Message(format!("{side} PASS")));
        }
        can_move
    }

    fn finish(&mut self, sides: Sides, out: &mut Vec<Notification<E::Field>>) {
        let score = Score::from_counts(self.engine.score(&self.field), sides);
        let outcome = score.outcome();
        info!(human = score.human, computer = score.computer, ?outcome, "game over");
        out.push(Notification::GameOver(format!("{score}\n{outcome}")));
        out.push(Notification::ShowColorPrompt);
    }

    fn render(&self) -> Notification<E::Field> {
        Notification::Render {
            field: self.field.clone(),
            score: self.score(),
        }
    }
}
