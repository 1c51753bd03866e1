use tracing::{debug, debug_span};

use ryusei_core::settings::KeyPolicy;

use super::enemy::Enemy;
use super::types::{BattleResult, EnemyId, Notification};
use super::Battle;

impl Battle {
    /// Advance the battle by one frame.
    ///
    /// Order: deadline, health, spawn, key intake, at most one key processed,
    /// enemy movement and collisions, health again. Returns an empty list
    /// when nothing changed, including every call after the battle has
    /// finished.
    pub fn tick(&mut self, keys: &[char]) -> Vec<Notification> {
        if self.is_finished() {
            return Vec::new();
        }
        self.tick += 1;
        let _span = debug_span!("tick", tick = self.tick).entered();

        // `collide` may have emptied health between ticks.
        if self.tick > self.config.end_ticks || self.health == 0 {
            return vec![Notification::Finished(self.finish())];
        }

        let mut out = Vec::new();
        if self.config.spawn_ticks > 0 && self.tick % self.config.spawn_ticks == 0 {
            out.push(self.spawn());
        }

        match self.config.key_policy {
            KeyPolicy::Fifo => self.pending.extend(keys.iter().copied()),
            KeyPolicy::Latest => {
                if let Some(&last) = keys.last() {
                    self.pending.clear();
                    self.pending.push_back(last);
                }
            }
        }
        if let Some(key) = self.pending.pop_front() {
            out.extend(self.process_key(key));
        }

        out.extend(self.advance_enemies());

        if self.health == 0 {
            out.push(Notification::Finished(self.finish()));
        }
        out
    }

    /// Pick a word and add an unlocked enemy for it.
    ///
    /// Yields `SpawnSkipped` when every first kana is currently excluded or
    /// the battle has finished.
    pub fn spawn(&mut self) -> Notification {
        if self.is_finished() {
            return Notification::SpawnSkipped;
        }
        let Some(word) = self.selector.select_next() else {
            debug!("spawn skipped: no selectable first kana");
            return Notification::SpawnSkipped;
        };
        let id = self.next_enemy;
        self.next_enemy += 1;

        let enemy = Enemy::new(
            id,
            word,
            self.vocab.entry(word),
            self.config.spawn_distance,
            self.config.point,
        );
        let notification = Notification::Spawned {
            enemy: id,
            word,
            display: enemy.display.clone(),
            predicted: enemy.matcher.predicted().to_string(),
        };
        debug!(enemy = id, reading = %enemy.reading, "spawned");
        self.roster.insert(enemy);
        notification
    }

    /// Consume an externally detected collision. `None` for an unknown enemy.
    ///
    /// The enemy is destroyed and the target takes one point of damage,
    /// whether or not the enemy was locked.
    pub fn collide(&mut self, id: EnemyId) -> Option<Notification> {
        let (enemy, was_locked) = self.roster.remove(id)?;
        if !was_locked {
            self.selector.release(enemy.first_kana);
        }
        self.health = self.health.saturating_sub(1);
        self.score.damage += 1;
        debug!(enemy = id, was_locked, health = self.health, "collided");
        Some(Notification::Collided {
            enemy: id,
            health: self.health,
        })
    }

    /// End the battle: drop every enemy, release their exclusions, and
    /// compute the result. Later calls return the same result.
    pub fn finish(&mut self) -> BattleResult {
        if let Some(result) = self.result {
            return result;
        }
        for id in self.roster.ids() {
            if let Some((enemy, was_locked)) = self.roster.remove(id) {
                if !was_locked {
                    self.selector.release(enemy.first_kana);
                }
            }
        }
        self.pending.clear();
        let result = self.score.result(self.health, &self.config.ratios);
        debug!(?result, "finished");
        self.result = Some(result);
        result
    }

    fn advance_enemies(&mut self) -> Vec<Notification> {
        let speed = self.config.speed;
        let arrived: Vec<EnemyId> = self
            .roster
            .iter_mut()
            .filter_map(|e| e.advance(speed).then_some(e.id))
            .collect();
        arrived
            .into_iter()
            .filter_map(|id| self.collide(id))
            .collect()
    }
}
