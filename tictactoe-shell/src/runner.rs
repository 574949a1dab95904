//! Drive a controller from a command script

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::controller::{Control, Controller};
use crate::hud::Hud;
use crate::script::{parse_line, Command};

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
}

pub struct Runner {
    controller: Controller,
    hold_ticks: u32,
    quiet: bool,
}

impl Runner {
    pub fn new(controller: Controller, hold_ticks: u32, quiet: bool) -> Self {
        Self {
            controller,
            hold_ticks,
            quiet,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Read commands until `quit` or end of input
    ///
    /// The first frame runs before any command so the board is ready.
    /// Malformed lines are reported on `out` and skipped. In quiet mode the
    /// board is only printed on `show`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<Exit> {
        self.controller.tick(&Default::default());
        if !self.quiet {
            self.render(&mut out)?;
        }

        for (line_no, line) in input.lines().enumerate() {
            let line = line?;
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = line_no + 1, "skipping command: {}", e);
                    writeln!(out, "error: line {}: {}", line_no + 1, e)?;
                    continue;
                }
            };

            match command {
                Command::Show => {
                    self.render(&mut out)?;
                    continue;
                }
                Command::Dump => {
                    self.dump(&mut out)?;
                    continue;
                }
                _ => {}
            }

            debug!(?command, "running command");
            for frame in command.frames(self.hold_ticks) {
                if self.controller.tick(&frame) == Control::Quit {
                    writeln!(out, "Bye.")?;
                    out.flush()?;
                    info!(frames = self.controller.frames(), "session ended");
                    return Ok(Exit::Quit);
                }
            }

            if !self.quiet {
                self.render(&mut out)?;
            }
        }

        out.flush()?;
        info!(frames = self.controller.frames(), "input exhausted");
        Ok(Exit::EndOfInput)
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", Hud::new(&self.controller))?;
        Ok(())
    }

    fn dump<W: Write>(&self, out: &mut W) -> Result<()> {
        let snapshot = self.controller.engine().snapshot();
        write!(out, "{}", toml::to_string(&snapshot)?)?;
        Ok(())
    }
}
