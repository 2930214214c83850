#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that turns move intents into player commands.

use sword_arena_core::{Command, Event};

/// Reacts to [`Event::Move`] by moving the player and interrupting any swing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits the commands that carry out a move intent.
    ///
    /// Clamping is left to the world so the player can never be commanded
    /// outside the arena, whatever step arrives.
    pub fn handle(&self, event: &Event, out: &mut Vec<Command>) {
        let Event::Move { step } = event else {
            return;
        };

        out.push(Command::MovePlayer { step: *step });
        out.push(Command::CancelSwing);
    }
}
