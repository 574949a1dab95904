use anyhow::Result;
use std::io;
use tracing::{error, info};

use tictactoe_shell::input::PointerMapper;
use tictactoe_shell::{Config, Controller, Runner};

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::load()?;

    // Validate configuration
    config.validate()?;

    // Initialize tracing; logs go to stderr so stdout carries only frames
    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(io::stderr)
        .init();

    let start = config.start_policy();
    info!(
        "Starting tictactoe on a {}px board, hold {} frames to reset or quit",
        config.board_px(),
        config.hold_ticks
    );
    info!("Opening policy: {:?}", start);

    let controller = Controller::new(PointerMapper::new(config.cell_size), start, config.hold_ticks);
    let mut runner = Runner::new(controller, config.hold_ticks, config.quiet);

    match runner.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(exit) => {
            info!("Session finished: {:?}", exit);
            Ok(())
        }
        Err(e) => {
            error!("Session failed: {}", e);
            Err(e)
        }
    }
}
