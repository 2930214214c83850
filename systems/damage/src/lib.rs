#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that removes enemies standing on struck cells.

use log::debug;
use sword_arena_core::{Command, EnemyView, Event};

/// Resolves [`Event::Damage`] against the live enemies.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageResolution;

impl DamageResolution {
    /// Creates a new damage resolution system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits a removal for every enemy standing on the struck cell.
    ///
    /// Matches are taken from the immutable `enemies` view, so every enemy
    /// sharing the cell is removed, not only the first one found.
    pub fn handle(&self, event: &Event, enemies: &EnemyView, out: &mut Vec<Command>) {
        let Event::Damage { cell } = event else {
            return;
        };

        for enemy in enemies.iter().filter(|enemy| enemy.cell == *cell) {
            debug!(
                "enemy {} struck at ({}, {})",
                enemy.id.get(),
                cell.column(),
                cell.row()
            );
            out.push(Command::RemoveEnemy { enemy: enemy.id });
        }
    }
}
