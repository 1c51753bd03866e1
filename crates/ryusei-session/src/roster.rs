use std::collections::BTreeMap;

use tracing::warn;

use crate::enemy::Enemy;
use crate::types::EnemyId;

/// Live enemies plus the first-key index used to pick a target.
///
/// Every live enemy is either indexed under its first keys or is the single
/// locked enemy, never both.
#[derive(Default)]
pub(crate) struct Roster {
    enemies: BTreeMap<EnemyId, Enemy>,
    index: BTreeMap<char, EnemyId>,
    locked: Option<EnemyId>,
}

impl Roster {
    /// Add an unlocked enemy and index it under its first keys.
    pub fn insert(&mut self, enemy: Enemy) {
        for &key in &enemy.first_keys {
            if let Some(&other) = self.index.get(&key) {
                warn!(%key, enemy = enemy.id, other, "first key already taken");
                continue;
            }
            self.index.insert(key, enemy.id);
        }
        self.enemies.insert(enemy.id, enemy);
    }

    pub fn locked(&self) -> Option<EnemyId> {
        self.locked
    }

    /// Lock the enemy indexed under `key`, dropping all of its index entries.
    pub fn lock_by_key(&mut self, key: char) -> Option<EnemyId> {
        if self.locked.is_some() {
            return None;
        }
        let id = *self.index.get(&key)?;
        self.index.retain(|_, v| *v != id);
        self.locked = Some(id);
        Some(id)
    }

    /// Remove an enemy in either state. Returns it with its lock state.
    pub fn remove(&mut self, id: EnemyId) -> Option<(Enemy, bool)> {
        let enemy = self.enemies.remove(&id)?;
        let was_locked = self.locked == Some(id);
        if was_locked {
            self.locked = None;
        } else {
            self.index.retain(|_, v| *v != id);
        }
        Some((enemy, was_locked))
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.values_mut()
    }

    pub fn ids(&self) -> Vec<EnemyId> {
        self.enemies.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    #[cfg(test)]
    pub fn is_indexed(&self, id: EnemyId) -> bool {
        self.index.values().any(|&v| v == id)
    }

    #[cfg(test)]
    pub fn index(&self) -> &BTreeMap<char, EnemyId> {
        &self.index
    }
}
