#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure chase system that advances enemies toward the player.
//!
//! Enemies advance in response to player moves rather than elapsed time: every
//! [`Event::Move`] gives each enemy one chance to step or to count down its
//! cooldown.

use sword_arena_core::{CellCoord, Command, EnemyView, Event, Step};

/// Cooldown-gated pursuit of the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chase;

impl Chase {
    /// Creates a new chase system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits one step or one cooldown tick per live enemy, in identifier order.
    ///
    /// `player` must reflect the move that triggered the event, so callers
    /// subscribe this system after the movement system.
    pub fn handle(
        &self,
        event: &Event,
        player: CellCoord,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !matches!(event, Event::Move { .. }) {
            return;
        }

        for enemy in enemies.iter() {
            if enemy.ready_to_move() {
                out.push(Command::StepEnemy {
                    enemy: enemy.id,
                    step: Step::toward(enemy.cell, player),
                });
            } else {
                out.push(Command::CoolEnemy { enemy: enemy.id });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sword_arena_core::{EnemyId, EnemySnapshot};

    fn enemy(id: u32, column: u32, row: u32, cooldown: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            cell: CellCoord::new(column, row),
            cooldown,
            move_delay: 2,
        }
    }

    #[test]
    fn ready_enemies_step_and_others_cool_down() {
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 10, 5, 0), enemy(2, 0, 0, 2)]);
        let mut out = Vec::new();

        Chase::new().handle(
            &Event::Move {
                step: Step::new(1, 0),
            },
            CellCoord::new(5, 5),
            &enemies,
            &mut out,
        );

        assert_eq!(
            out,
            vec![
                Command::StepEnemy {
                    enemy: EnemyId::new(1),
                    step: Step::new(-1, 0),
                },
                Command::CoolEnemy {
                    enemy: EnemyId::new(2)
                },
            ]
        );
    }

    #[test]
    fn only_move_events_drive_the_chase() {
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 10, 5, 0)]);
        let mut out = Vec::new();
        Chase::new().handle(
            &Event::Input { key: 'w' },
            CellCoord::new(5, 5),
            &enemies,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
