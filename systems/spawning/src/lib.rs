#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system that relocates the spawner and creates enemies.

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sword_arena_core::{Command, Corner, SpawnerSnapshot, SpawnerTimer};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided corner selection seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// System that advances both spawner countdowns once per tick.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits this tick's spawner commands.
    ///
    /// Each countdown either elapses, producing its action, or counts down by
    /// one. The relocation command precedes the spawn command, so an enemy
    /// created on the same tick appears at the new corner.
    pub fn handle(&mut self, spawner: SpawnerSnapshot, out: &mut Vec<Command>) {
        if spawner.relocation_cooldown == 0 {
            let corner = self.select_corner();
            trace!("spawner hops from {:?} to {corner:?}", spawner.corner);
            out.push(Command::RelocateSpawner { corner });
        } else {
            out.push(Command::CoolSpawner {
                timer: SpawnerTimer::Relocation,
            });
        }

        if spawner.spawn_cooldown == 0 {
            out.push(Command::SpawnEnemy);
        } else {
            out.push(Command::CoolSpawner {
                timer: SpawnerTimer::Spawn,
            });
        }
    }

    fn select_corner(&mut self) -> Corner {
        let index = self.rng.gen_range(0..Corner::ALL.len());
        Corner::ALL[index]
    }
}
