//! Text rendering of the board and status lines

use std::fmt;

use tictactoe_core::board::SIZE;
use tictactoe_core::{Cell, GameState, Player, RoundResult, Snapshot};

use crate::controller::Controller;
use crate::input::HoldGesture;

/// Everything drawn for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    snapshot: Snapshot,
    hovered: Option<(usize, usize)>,
    closing: Option<f32>,
    resetting: Option<f32>,
}

impl Hud {
    pub fn new(controller: &Controller) -> Self {
        let visible = |hold: &HoldGesture| hold.is_visible().then(|| hold.progress());
        Self {
            snapshot: controller.engine().snapshot(),
            hovered: controller.hovered_cell(),
            closing: visible(controller.quit_hold()),
            resetting: visible(controller.reset_hold()),
        }
    }

    fn symbol(&self, col: usize, row: usize) -> char {
        match self.snapshot.board.get(col, row) {
            Some(Cell::O) => 'O',
            Some(Cell::X) => 'X',
            _ if self.previews(col, row) => match self.snapshot.current_player {
                Player::O => 'o',
                Player::X => 'x',
            },
            _ => '.',
        }
    }

    /// Whether the hovered empty cell shows the mover's mark in lowercase
    fn previews(&self, col: usize, row: usize) -> bool {
        self.snapshot.state == GameState::InProgress && self.hovered == Some((col, row))
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let cells: Vec<String> = (0..SIZE)
                .map(|col| self.symbol(col, row).to_string())
                .collect();
            writeln!(f, " {}", cells.join(" | "))?;
            if row < SIZE - 1 {
                writeln!(f, "---+---+---")?;
            }
        }

        writeln!(f, "O: {} | X: {}", self.snapshot.score.o, self.snapshot.score.x)?;

        match (self.snapshot.state, self.snapshot.result) {
            (GameState::AwaitingStart, _) => writeln!(f, "Waiting to start")?,
            (GameState::InProgress, _) => writeln!(f, "{} to move", self.snapshot.current_player)?,
            (GameState::RoundOver, Some(RoundResult::Won(player))) => writeln!(f, "{} wins!", player)?,
            (GameState::RoundOver, _) => writeln!(f, "No one wins!")?,
        }

        if let Some(progress) = self.closing {
            writeln!(f, "CLOSING... {:.0}%", progress * 100.0)?;
        } else if let Some(progress) = self.resetting {
            writeln!(f, "RESETTING... {:.0}%", progress * 100.0)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StartPolicy;
    use crate::input::{FrameInput, PointerMapper};

    fn started() -> Controller {
        let mut controller = Controller::new(PointerMapper::new(160), StartPolicy::Fixed(Player::O), 4);
        controller.tick(&FrameInput::default());
        controller
    }

    fn click(controller: &mut Controller, x: i32, y: i32) {
        controller.tick(&FrameInput {
            click: Some((x, y)),
            ..FrameInput::default()
        });
    }

    #[test]
    fn test_awaiting_start() {
        let controller = Controller::new(PointerMapper::new(160), StartPolicy::Seeded(1), 4);
        let text = Hud::new(&controller).to_string();
        assert!(text.ends_with("O: 0 | X: 0\nWaiting to start\n"));
    }

    #[test]
    fn test_board_and_turn() {
        let mut controller = started();
        click(&mut controller, 10, 10);
        let text = Hud::new(&controller).to_string();
        let expected = concat!(
            " O | . | .\n",
            "---+---+---\n",
            " . | . | .\n",
            "---+---+---\n",
            " . | . | .\n",
            "O: 0 | X: 0\n",
            "X to move\n",
        );
        // The hovered cell is taken, so no preview is drawn
        assert_eq!(text, expected);
    }

    #[test]
    fn test_hover_preview() {
        let mut controller = started();
        controller.tick(&FrameInput {
            cursor: Some((400, 400)),
            ..FrameInput::default()
        });
        let text = Hud::new(&controller).to_string();
        assert!(text.starts_with(" . | . | .\n---+---+---\n . | . | .\n---+---+---\n . | . | o\n"));
    }

    #[test]
    fn test_banners() {
        let mut controller = started();
        for (x, y) in [(0, 0), (200, 200), (0, 200), (400, 400), (0, 400)] {
            click(&mut controller, x, y);
        }
        let text = Hud::new(&controller).to_string();
        assert!(text.contains("O: 1 | X: 0\nO wins!\n"));
    }

    #[test]
    fn test_draw_banner() {
        let mut controller = started();
        for (col, row) in [(0, 0), (1, 0), (2, 0), (1, 1), (0, 1), (2, 1), (2, 2), (0, 2), (1, 2)] {
            click(&mut controller, col * 160, row * 160);
        }
        let text = Hud::new(&controller).to_string();
        assert!(text.contains("No one wins!"));
    }

    #[test]
    fn test_hold_indicators() {
        let mut controller = started();
        let both = FrameInput {
            reset_down: true,
            quit_down: true,
            ..FrameInput::default()
        };
        controller.tick(&both);
        assert!(!Hud::new(&controller).to_string().contains("..."));

        controller.tick(&both);
        let text = Hud::new(&controller).to_string();
        assert!(text.ends_with("CLOSING... 50%\n"));
        assert!(!text.contains("RESETTING"));

        controller.tick(&FrameInput {
            reset_down: true,
            ..FrameInput::default()
        });
        assert!(Hud::new(&controller).to_string().ends_with("RESETTING... 75%\n"));
    }
}
