#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combat system that turns attack intents into swings and strikes.

use std::time::Duration;

use log::debug;
use sword_arena_core::{Arena, CellCoord, Command, Direction, Event, Orientation, Swing};

const SWING_EAST: &[&str] = &["-->"];
const SWING_WEST: &[&str] = &["<--"];
const SWING_SOUTH: &[&str] = &["|", "v"];
const SWING_NORTH: &[&str] = &["^", "|"];

/// Builds the swing produced by attacking in `direction` from `player`.
///
/// The result depends only on its inputs, so repeating an attack from the same
/// cell strikes the same cells.
#[must_use]
pub fn swing_for(player: CellCoord, direction: Direction, started_at: Duration) -> Swing {
    let origin = player.to_point();
    let (anchor, pattern, orientation) = match direction {
        Direction::East => (origin.offset(1, 0), SWING_EAST, Orientation::Horizontal),
        Direction::West => (origin.offset(-3, 0), SWING_WEST, Orientation::Horizontal),
        Direction::South => (origin.offset(0, 1), SWING_SOUTH, Orientation::Vertical),
        Direction::North => (origin.offset(0, -2), SWING_NORTH, Orientation::Vertical),
    };
    Swing::new(anchor, pattern, orientation, started_at)
}

/// Arena cells struck by the swing, in pattern order.
pub fn struck_cells<'swing>(
    swing: &'swing Swing,
    arena: &'swing Arena,
) -> impl Iterator<Item = CellCoord> + 'swing {
    swing.glyphs().filter_map(|(point, _)| arena.cell_at(point))
}

/// Combat system that resolves attack intents.
#[derive(Clone, Copy, Debug, Default)]
pub struct Combat;

impl Combat {
    /// Creates a new combat system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves an attack issued by the player standing on `player` at time `now`.
    ///
    /// One [`Event::Damage`] per in-arena swing cell is pushed to `strikes`;
    /// callers dispatch them before applying the [`Command::ShowSwing`] pushed
    /// to `out`, so enemies are hit before the swing becomes visible.
    pub fn handle(
        &self,
        event: &Event,
        arena: Arena,
        player: CellCoord,
        now: Duration,
        strikes: &mut Vec<Event>,
        out: &mut Vec<Command>,
    ) {
        let Event::Attack { direction } = event else {
            return;
        };

        let swing = swing_for(player, *direction, now);
        let before = strikes.len();
        strikes.extend(struck_cells(&swing, &arena).map(|cell| Event::Damage { cell }));
        debug!(
            "attack {direction:?} from ({}, {}) strikes {} cells",
            player.column(),
            player.row(),
            strikes.len() - before
        );
        out.push(Command::ShowSwing { swing });
    }
}
