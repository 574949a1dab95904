//! Text presentation shell for the tic-tac-toe engine
//!
//! Stands in for a graphical host: it maps pointer pixels to cells, runs the
//! press-and-hold reset and quit gestures, and renders frames as text.

pub mod config;
pub mod controller;
pub mod hud;
pub mod input;
pub mod runner;
pub mod script;

// Re-export main types
pub use config::Config;
pub use controller::{Control, Controller, StartPolicy};
pub use runner::{Exit, Runner};
