//! Line-based command script read from stdin
//!
//! Each command expands to the frames a real input device would produce.

use std::iter;
use std::str::FromStr;

use crate::input::FrameInput;

/// Largest frame count a single `tick` may request
pub const MAX_TICKS: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing argument <{arg}> for '{command}'")]
    MissingArgument { command: &'static str, arg: &'static str },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Tick count {0} exceeds the limit of {}", MAX_TICKS)]
    TooManyTicks(u32),
    #[error("Unexpected trailing input: {0}")]
    TrailingInput(String),
}

/// One scripted action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Tick(u32),
    Reset,
    Quit,
    Show,
    /// Print the engine snapshot as TOML
    Dump,
}

impl Command {
    /// Frames this command feeds to the controller, produced lazily
    ///
    /// `reset` holds the key for `hold_ticks` frames and then releases it.
    /// `quit` only holds, since the controller stops on the last frame.
    pub fn frames(&self, hold_ticks: u32) -> impl Iterator<Item = FrameInput> {
        let idle = FrameInput::default();
        let (frame, count, release) = match *self {
            Command::Click { x, y } => (
                FrameInput {
                    click: Some((x, y)),
                    ..idle
                },
                1,
                None,
            ),
            Command::Move { x, y } => (
                FrameInput {
                    cursor: Some((x, y)),
                    ..idle
                },
                1,
                None,
            ),
            Command::Tick(n) => (idle, n, None),
            Command::Reset => (
                FrameInput {
                    reset_down: true,
                    ..idle
                },
                hold_ticks,
                Some(idle),
            ),
            Command::Quit => (
                FrameInput {
                    quit_down: true,
                    ..idle
                },
                hold_ticks,
                None,
            ),
            Command::Show | Command::Dump => (idle, 0, None),
        };
        iter::repeat(frame).take(count as usize).chain(release)
    }
}

fn number<T: FromStr>(
    parts: &mut std::str::SplitWhitespace<'_>,
    command: &'static str,
    arg: &'static str,
) -> Result<T, CommandError> {
    let raw = parts
        .next()
        .ok_or(CommandError::MissingArgument { command, arg })?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// Parse one script line; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "click" => Command::Click {
            x: number(&mut parts, "click", "x")?,
            y: number(&mut parts, "click", "y")?,
        },
        "move" => Command::Move {
            x: number(&mut parts, "move", "x")?,
            y: number(&mut parts, "move", "y")?,
        },
        "tick" => match parts.next() {
            Some(raw) => {
                let n: u32 = raw
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                if n > MAX_TICKS {
                    return Err(CommandError::TooManyTicks(n));
                }
                Command::Tick(n)
            }
            None => Command::Tick(1),
        },
        "reset" => Command::Reset,
        "quit" => Command::Quit,
        "show" => Command::Show,
        "dump" => Command::Dump,
        _ => return Err(CommandError::UnknownCommand(word.to_string())),
    };

    let rest: Vec<&str> = parts.collect();
    if !rest.is_empty() {
        return Err(CommandError::TrailingInput(rest.join(" ")));
    }

    Ok(Some(command))
}
