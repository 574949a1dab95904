//! Tic-tac-toe round engine
//!
//! This crate holds the game rules and nothing else:
//! - `board`: cells, players and the winning-line table
//! - `engine`: the round state machine, scoring and turn alternation
//! - `error`: rejection reasons for mark placement
//!
//! Rendering and input handling live with the caller. The engine only
//! exposes discrete operations and read-only queries.

pub mod board;
pub mod engine;
pub mod error;

// Re-export main types for convenience
pub use board::{Board, Cell, Player, WINNING_LINES};
pub use engine::{Engine, GameState, Placement, RoundResult, Score, Snapshot};
pub use error::PlaceError;
