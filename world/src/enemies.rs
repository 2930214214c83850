//! Authoritative enemy state management utilities.

use std::collections::BTreeMap;

use sword_arena_core::{CellCoord, EnemyId, EnemySnapshot};

/// State of a live enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    /// Identifier allocated by the world for the enemy.
    pub(crate) id: EnemyId,
    /// Arena cell currently occupied.
    pub(crate) cell: CellCoord,
    /// Player moves remaining before the enemy may step again.
    pub(crate) cooldown: u32,
    /// Cooldown restored after each step.
    pub(crate) move_delay: u32,
}

impl EnemyState {
    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            cell: self.cell,
            cooldown: self.cooldown,
            move_delay: self.move_delay,
        }
    }
}

/// Registry that stores live enemies and manages identifier allocation.
///
/// Removed enemies are evicted outright; identifiers are never reused.
#[derive(Debug)]
pub(crate) struct EnemyRegistry {
    entries: BTreeMap<EnemyId, EnemyState>,
    next_enemy_id: Option<EnemyId>,
}

impl EnemyRegistry {
    /// Creates an empty enemy registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_enemy_id: Some(EnemyId::new(0)),
        }
    }

    /// Inserts a fresh enemy that waits a full delay before its first step.
    ///
    /// Returns `None` once the identifier space is exhausted.
    pub(crate) fn spawn(&mut self, cell: CellCoord, move_delay: u32) -> Option<EnemyId> {
        let id = self.next_enemy_id?;
        self.next_enemy_id = id.get().checked_add(1).map(EnemyId::new);
        let _ = self.entries.insert(
            id,
            EnemyState {
                id,
                cell,
                cooldown: move_delay,
                move_delay,
            },
        );
        Some(id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut EnemyState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: EnemyId) -> Option<EnemyState> {
        self.entries.remove(&id)
    }

    /// Live enemies in ascending identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &EnemyState> {
        self.entries.values()
    }
}
