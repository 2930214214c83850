#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure systems that translate raw key presses into semantic intents.
//!
//! Movement and attack translation are independent subscribers of
//! [`Event::Input`]. Their key tables are disjoint, so a single key yields at
//! most one intent between them.

use sword_arena_core::{Direction, Event};

/// Maps a movement key (`w`, `a`, `s`, `d`) to its direction.
#[must_use]
pub const fn movement_direction(key: char) -> Option<Direction> {
    match key {
        'w' => Some(Direction::North),
        'a' => Some(Direction::West),
        's' => Some(Direction::South),
        'd' => Some(Direction::East),
        _ => None,
    }
}

/// Maps an attack key (`i`, `j`, `k`, `l`) to its direction.
#[must_use]
pub const fn attack_direction(key: char) -> Option<Direction> {
    match key {
        'i' => Some(Direction::North),
        'j' => Some(Direction::West),
        'k' => Some(Direction::South),
        'l' => Some(Direction::East),
        _ => None,
    }
}

/// Translates movement keys into [`Event::Move`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveIntent;

impl MoveIntent {
    /// Creates a new movement intent system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits a move event when `event` carries a movement key.
    pub fn handle(&self, event: &Event, out: &mut Vec<Event>) {
        let Event::Input { key } = event else {
            return;
        };

        if let Some(direction) = movement_direction(*key) {
            out.push(Event::Move {
                step: direction.step(),
            });
        }
    }
}

/// Translates attack keys into [`Event::Attack`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackIntent;

impl AttackIntent {
    /// Creates a new attack intent system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits an attack event when `event` carries an attack key.
    pub fn handle(&self, event: &Event, out: &mut Vec<Event>) {
        let Event::Input { key } = event else {
            return;
        };

        if let Some(direction) = attack_direction(*key) {
            out.push(Event::Attack { direction });
        }
    }
}
