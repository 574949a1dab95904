//! Board representation and win-line evaluation
//!
//! The board is a 3x3 grid addressed by `(col, row)` and stored row-major.
//! Win detection is driven by a fixed table of the eight winning lines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board side length
pub const SIZE: usize = 3;

/// Total number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

/// Winning positions as row-major index triples
///
/// Rows come first, then columns, then the two diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // columns
    [0, 4, 8], [2, 4, 6],           // diagonals
];

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    /// Both players, in the order lines are evaluated
    pub const ALL: [Player; 2] = [Player::O, Player::X];

    /// The other player
    pub fn opponent(self) -> Self {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::O => f.write_str("O"),
            Player::X => f.write_str("X"),
        }
    }
}

/// Contents of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    O,
    X,
}

impl Cell {
    /// The player who marked this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::O => Some(Player::O),
            Cell::X => Some(Player::X),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::O => Cell::O,
            Player::X => Cell::X,
        }
    }
}

/// Convert a `(col, row)` pair into a row-major index
///
/// Returns `None` when either coordinate is off the board.
pub fn index_of(col: usize, row: usize) -> Option<usize> {
    if col < SIZE && row < SIZE {
        Some(row * SIZE + col)
    } else {
        None
    }
}

/// The 3x3 playing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Cell at `(col, row)`, or `None` when off the board
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        index_of(col, row).map(|idx| self.cells[idx])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Write a cell by row-major index. Callers validate the index.
    pub(crate) fn set(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; CELLS];
    }

    /// Number of marked cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Whether `player` holds all three cells of any winning line
    pub fn has_line(&self, player: Player) -> bool {
        let mark = Cell::from(player);
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| self.cells[idx] == mark))
    }

    /// First player, O before X, who holds a complete line
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&player| self.has_line(player))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let symbol = match self.cells[row * SIZE + col] {
                    Cell::Empty => '.',
                    Cell::O => 'O',
                    Cell::X => 'X',
                };
                write!(f, "{}", symbol)?;
                if col < SIZE - 1 {
                    f.write_str(" ")?;
                }
            }
            if row < SIZE - 1 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
