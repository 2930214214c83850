#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sword Arena.

mod enemies;

use std::time::Duration;

use log::{debug, trace, warn};
use sword_arena_core::{
    Arena, CellCoord, Command, Corner, EnemyId, GameConfig, SpawnerTimer, Swing, WELCOME_BANNER,
};
use thiserror::Error;

use enemies::EnemyRegistry;

const INITIAL_SPAWNER_CORNER: Corner = Corner::TopLeft;

/// Represents the authoritative Sword Arena world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    arena: Arena,
    swing_display: Duration,
    enemy_move_delay: u32,
    clock: Duration,
    player: CellCoord,
    enemies: EnemyRegistry,
    spawner: Spawner,
    swing: Option<Swing>,
}

impl World {
    /// Creates a new world laid out according to the provided configuration.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let arena = config.arena;
        Self {
            banner: WELCOME_BANNER,
            arena,
            swing_display: config.swing_display,
            enemy_move_delay: config.enemy_move_delay,
            clock: Duration::ZERO,
            player: arena.clamp(config.player_start.to_point()),
            enemies: EnemyRegistry::new(),
            spawner: Spawner::new(
                INITIAL_SPAWNER_CORNER,
                config.spawner_relocation_delay,
                config.spawn_delay,
            ),
            swing: None,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[derive(Clone, Copy, Debug)]
struct Spawner {
    corner: Corner,
    relocation_cooldown: u32,
    relocation_delay: u32,
    spawn_cooldown: u32,
    spawn_delay: u32,
}

impl Spawner {
    const fn new(corner: Corner, relocation_delay: u32, spawn_delay: u32) -> Self {
        Self {
            corner,
            relocation_cooldown: relocation_delay,
            relocation_delay,
            spawn_cooldown: spawn_delay,
            spawn_delay,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that reference an enemy no longer in play are ignored.
pub fn apply(world: &mut World, command: Command) {
    trace!("applying {command:?}");
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
        }
        Command::MovePlayer { step } => {
            world.player = world.arena.step_clamped(world.player, step);
        }
        Command::CancelSwing => {
            if world.swing.take().is_some() {
                debug!("swing hidden at {:?}", world.clock);
            }
        }
        Command::ShowSwing { swing } => {
            world.swing = Some(swing);
        }
        Command::StepEnemy { enemy, step } => {
            let arena = world.arena;
            if let Some(state) = world.enemies.get_mut(enemy) {
                state.cell = arena.step_clamped(state.cell, step);
                state.cooldown = state.move_delay;
            }
        }
        Command::CoolEnemy { enemy } => {
            if let Some(state) = world.enemies.get_mut(enemy) {
                state.cooldown = state.cooldown.saturating_sub(1);
            }
        }
        Command::RemoveEnemy { enemy } => {
            if let Some(state) = world.enemies.remove(enemy) {
                debug!(
                    "enemy {} removed at ({}, {})",
                    enemy.get(),
                    state.cell.column(),
                    state.cell.row()
                );
            }
        }
        Command::RelocateSpawner { corner } => {
            world.spawner.corner = corner;
            world.spawner.relocation_cooldown = world.spawner.relocation_delay;
            debug!("spawner relocated to {corner:?}");
        }
        Command::SpawnEnemy => {
            let cell = world.arena.corner(world.spawner.corner);
            world.spawner.spawn_cooldown = world.spawner.spawn_delay;
            match world.enemies.spawn(cell, world.enemy_move_delay) {
                Some(enemy) => debug!(
                    "enemy {} spawned at ({}, {})",
                    enemy.get(),
                    cell.column(),
                    cell.row()
                ),
                None => warn!("enemy identifiers exhausted; spawn skipped"),
            }
        }
        Command::CoolSpawner { timer } => {
            let spawner = &mut world.spawner;
            match timer {
                SpawnerTimer::Relocation => {
                    spawner.relocation_cooldown = spawner.relocation_cooldown.saturating_sub(1);
                }
                SpawnerTimer::Spawn => {
                    spawner.spawn_cooldown = spawner.spawn_cooldown.saturating_sub(1);
                }
            }
        }
    }
}

/// Internal-consistency failures detected by [`check_invariants`].
///
/// None of these are reachable through normal play; they indicate a defect in
/// a system or in [`apply`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The player occupies a cell outside the arena.
    #[error("player left the arena at {cell:?}")]
    PlayerOutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// An enemy occupies a cell outside the arena.
    #[error("enemy {enemy:?} left the arena at {cell:?}")]
    EnemyOutOfBounds {
        /// Offending enemy.
        enemy: EnemyId,
        /// Offending cell.
        cell: CellCoord,
    },
    /// A visible swing has nothing to draw.
    #[error("visible swing has an empty pattern")]
    EmptySwing,
    /// A swing is still visible after its display window closed.
    #[error("swing still visible after {age:?}")]
    StaleSwing {
        /// Age of the swing when the check ran.
        age: Duration,
    },
}

/// Verifies the world invariants, reporting the first violation found.
///
/// Swing freshness is only guaranteed once expired swings have been hidden,
/// so callers run this after the render pass.
pub fn check_invariants(world: &World) -> Result<(), InvariantViolation> {
    if !world.arena.contains(world.player) {
        return Err(InvariantViolation::PlayerOutOfBounds { cell: world.player });
    }

    if let Some(state) = world
        .enemies
        .iter()
        .find(|state| !world.arena.contains(state.cell))
    {
        return Err(InvariantViolation::EnemyOutOfBounds {
            enemy: state.id,
            cell: state.cell,
        });
    }

    if let Some(swing) = &world.swing {
        if swing.glyphs().next().is_none() {
            return Err(InvariantViolation::EmptySwing);
        }
        if !swing.visible_at(world.clock, world.swing_display) {
            return Err(InvariantViolation::StaleSwing {
                age: swing.age(world.clock),
            });
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use sword_arena_core::{Arena, CellCoord, EnemyView, SpawnerSnapshot, Swing};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the arena the world is laid out on.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Total simulated time accumulated through `Command::Tick`.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|state| state.snapshot()).collect())
    }

    /// Captures the spawner's position and cooldowns.
    #[must_use]
    pub fn spawner(world: &World) -> SpawnerSnapshot {
        let spawner = world.spawner;
        SpawnerSnapshot {
            corner: spawner.corner,
            cell: world.arena.corner(spawner.corner),
            relocation_cooldown: spawner.relocation_cooldown,
            relocation_delay: spawner.relocation_delay,
            spawn_cooldown: spawner.spawn_cooldown,
            spawn_delay: spawner.spawn_delay,
        }
    }

    /// Swing currently on display, if any.
    #[must_use]
    pub fn swing(world: &World) -> Option<&Swing> {
        world.swing.as_ref()
    }

    /// Reports whether a swing is on display past its display window.
    #[must_use]
    pub fn swing_expired(world: &World) -> bool {
        world
            .swing
            .as_ref()
            .is_some_and(|swing| !swing.visible_at(world.clock, world.swing_display))
    }
}
