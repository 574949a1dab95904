use anyhow::{anyhow, Context, Result};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tictactoe_core::Player;
use tracing::Level;

use crate::controller::StartPolicy;

/// Largest accepted cell edge in pixels
const MAX_CELL_SIZE: u32 = 4096;

/// Longest accepted hold, ten seconds at 60 frames per second
const MAX_HOLD_TICKS: u32 = 600;

/// Who opens the first round
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// Derived from the seed parity
    Random,
    O,
    X,
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe driven by a text command script")]
#[command(long_about = "Two-player tic-tac-toe driven by a text command script.

Commands are read from stdin, one per line:
  click <x> <y>   press the pointer at pixel (x, y)
  move <x> <y>    move the pointer without pressing
  tick [n]        let n frames pass (default 1)
  reset           hold R until the reset fires
  quit            hold Escape until the game closes
  show            print the current board
  dump            print the engine snapshot as TOML")]
pub struct Config {
    /// Edge length of one board cell in pixels
    #[arg(long, env = "TICTACTOE_CELL_SIZE", default_value = "160")]
    pub cell_size: u32,

    /// Frames a key must be held to trigger reset or quit
    #[arg(long, env = "TICTACTOE_HOLD_TICKS", default_value = "60")]
    pub hold_ticks: u32,

    /// Who opens the first round (random, o, x)
    #[arg(long, env = "TICTACTOE_FIRST_PLAYER", value_enum, default_value = "random")]
    pub first_player: FirstPlayer,

    /// Seed for the random opening player
    #[arg(long, env = "TICTACTOE_SEED")]
    pub seed: Option<u64>,

    /// Only print the board on `show`; `dump` and errors still print
    #[arg(long, env = "TICTACTOE_QUIET")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TICTACTOE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// TOML file supplying values for options not given on the command line
    #[arg(long, env = "TICTACTOE_CONFIG")]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

/// Values read from a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub cell_size: Option<u32>,
    pub hold_ticks: Option<u32>,
    pub first_player: Option<FirstPlayer>,
    pub seed: Option<u64>,
    pub quiet: Option<bool>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| anyhow!("Invalid config file: {}", e))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&text)
    }
}

impl Config {
    /// Parse the process arguments and merge the optional config file
    pub fn load() -> Result<Self> {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches)
    }

    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::from_arg_matches(matches)?;
        if let Some(path) = config.config.clone() {
            let file = FileConfig::read(&path)?;
            config.apply_file(file, |id| {
                matches!(
                    matches.value_source(id),
                    Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
                )
            });
        }
        Ok(config)
    }

    /// Fill every option that `explicit` reports as unset from `file`
    pub fn apply_file(&mut self, file: FileConfig, explicit: impl Fn(&str) -> bool) {
        if let (Some(v), false) = (file.cell_size, explicit("cell_size")) {
            self.cell_size = v;
        }
        if let (Some(v), false) = (file.hold_ticks, explicit("hold_ticks")) {
            self.hold_ticks = v;
        }
        if let (Some(v), false) = (file.first_player, explicit("first_player")) {
            self.first_player = v;
        }
        if let (Some(v), false) = (file.seed, explicit("seed")) {
            self.seed = Some(v);
        }
        if let (Some(v), false) = (file.quiet, explicit("quiet")) {
            self.quiet = v;
        }
        if let (Some(v), false) = (file.log_level, explicit("log_level")) {
            self.log_level = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(anyhow!("cell_size must be greater than 0"));
        }

        if self.cell_size > MAX_CELL_SIZE {
            return Err(anyhow!("cell_size must be at most {}", MAX_CELL_SIZE));
        }

        if self.hold_ticks == 0 {
            return Err(anyhow!("hold_ticks must be greater than 0"));
        }

        if self.hold_ticks > MAX_HOLD_TICKS {
            return Err(anyhow!("hold_ticks must be at most {}", MAX_HOLD_TICKS));
        }

        self.level()?;

        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }

    /// Board edge length in pixels
    pub fn board_px(&self) -> u32 {
        self.cell_size * 3
    }

    /// Opening policy for the first round
    ///
    /// Without a configured seed, the seed is drawn from entropy.
    pub fn start_policy(&self) -> StartPolicy {
        match self.first_player {
            FirstPlayer::O => StartPolicy::Fixed(Player::O),
            FirstPlayer::X => StartPolicy::Fixed(Player::X),
            FirstPlayer::Random => {
                let seed = self
                    .seed
                    .unwrap_or_else(|| ChaCha20Rng::from_entropy().gen());
                StartPolicy::Seeded(seed)
            }
        }
    }
}
