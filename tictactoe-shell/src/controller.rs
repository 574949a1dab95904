//! Per-frame glue between input and the engine
//!
//! The controller plays the role of the host game loop's update step: it
//! receives one [`FrameInput`] per frame and turns it into engine calls.

use tictactoe_core::{Engine, GameState, Player};
use tracing::{debug, info};

use crate::input::{FrameInput, HoldGesture, PointerMapper};

/// How the first round's opener is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    Seeded(u64),
    Fixed(Player),
}

/// What the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Controller {
    engine: Engine,
    mapper: PointerMapper,
    start: StartPolicy,
    reset_hold: HoldGesture,
    quit_hold: HoldGesture,
    cursor: Option<(i32, i32)>,
    frames: u64,
}

impl Controller {
    pub fn new(mapper: PointerMapper, start: StartPolicy, hold_ticks: u32) -> Self {
        Self {
            engine: Engine::new(),
            mapper,
            start,
            reset_hold: HoldGesture::new(hold_ticks),
            quit_hold: HoldGesture::new(hold_ticks),
            cursor: None,
            frames: 0,
        }
    }

    /// Run one frame
    pub fn tick(&mut self, input: &FrameInput) -> Control {
        self.frames += 1;
        if let Some(pos) = input.click.or(input.cursor) {
            self.cursor = Some(pos);
        }

        match self.engine.state() {
            GameState::AwaitingStart => self.start_game(),
            GameState::InProgress => {
                if let Some((x, y)) = input.click {
                    self.click(x, y);
                }
            }
            GameState::RoundOver => {
                if input.click.is_some() {
                    self.engine.load_next_round();
                }
            }
        }

        if self.reset_hold.update(input.reset_down) {
            self.engine.restart();
        }

        if self.quit_hold.update(input.quit_down) {
            info!(frames = self.frames, "quit requested");
            return Control::Quit;
        }

        Control::Continue
    }

    fn start_game(&mut self) {
        match self.start {
            StartPolicy::Seeded(seed) => self.engine.initialize(seed),
            StartPolicy::Fixed(player) => self.engine.initialize_with_starter(player),
        }
    }

    fn click(&mut self, x: i32, y: i32) {
        let Some((col, row)) = self.mapper.cell_at(x, y) else {
            debug!(x, y, "click outside the board");
            return;
        };

        match self.engine.place_mark(col, row) {
            Ok(placement) => {
                if let Some(result) = placement.result {
                    info!(?result, round = self.engine.round(), "round finished");
                }
            }
            Err(e) => debug!(col, row, "placement rejected: {}", e),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Board cell under the last known pointer position
    pub fn hovered_cell(&self) -> Option<(usize, usize)> {
        self.cursor.and_then(|(x, y)| self.mapper.cell_at(x, y))
    }

    pub fn reset_hold(&self) -> &HoldGesture {
        &self.reset_hold
    }

    pub fn quit_hold(&self) -> &HoldGesture {
        &self.quit_hold
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
