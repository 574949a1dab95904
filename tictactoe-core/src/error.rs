//! Rejection reasons for engine operations

use crate::engine::GameState;

/// Why a mark placement was rejected
///
/// Every variant is recoverable: the engine state is left untouched and the
/// caller is free to try another cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("Invalid coordinate: ({col}, {row}) is off the board")]
    InvalidCoordinate { col: usize, row: usize },
    #[error("Cell ({col}, {row}) is already occupied")]
    CellOccupied { col: usize, row: usize },
    #[error("Cannot place a mark while the game is {0:?}")]
    WrongState(GameState),
}
