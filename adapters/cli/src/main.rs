#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Sword Arena in the terminal.

mod logging;
mod terminal;

use std::{path::Path, thread, time::Instant};

use anyhow::Result as AnyResult;
use log::info;
use sword_arena_core::GameConfig;
use sword_arena_system_bootstrap::Game;
use sword_arena_system_spawning::Config;
use sword_arena_world::query;

use terminal::{KeyboardInput, TerminalDisplay, TerminalSession};

/// Log destination; stderr would draw over the alternate screen.
const LOG_FILE: &str = "sword-arena.log";

/// Entry point for the Sword Arena command-line interface.
fn main() -> AnyResult<()> {
    logging::init(Path::new(LOG_FILE))?;

    let seed = rand::random::<u64>();
    let mut game = Game::new(GameConfig::default(), Config::new(seed));
    info!(
        "{} (spawner seed {seed:#x})",
        query::welcome_banner(game.world())
    );

    let session = TerminalSession::start()?;
    let mut input = KeyboardInput::new();
    let mut display = TerminalDisplay::new();

    let mut last_frame = Instant::now();
    let outcome = loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;

        if let Err(error) = game.run_frame(&mut input, &mut display, dt) {
            break Err(error);
        }
        if input.interrupted() {
            break Ok(());
        }
        thread::sleep(game.config().tick);
    };

    drop(session);
    outcome
}
