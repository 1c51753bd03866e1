use tracing::{debug, debug_span, warn};

use ryusei_core::matcher::KeyOutcome;

use super::types::{EnemyId, Notification};
use super::Battle;

impl Battle {
    /// Route one keystroke: to the locked enemy if there is one, otherwise to
    /// the unlocked enemy indexed under the key, which becomes locked.
    pub(crate) fn process_key(&mut self, key: char) -> Vec<Notification> {
        let _span = debug_span!("process_key", %key, locked = ?self.roster.locked()).entered();

        if let Some(id) = self.roster.locked() {
            return self.feed_locked(id, key);
        }

        let Some(id) = self.roster.lock_by_key(key) else {
            self.score.miss();
            return vec![Notification::KeyRejected { key }];
        };
        // Typing has started: the first kana may spawn again.
        if let Some(enemy) = self.roster.get(id) {
            debug!(enemy = id, kana = %enemy.first_kana, "locked");
            self.selector.release(enemy.first_kana);
        }
        let mut out = vec![Notification::Locked { enemy: id }];
        out.extend(self.feed_locked(id, key));
        out
    }

    fn feed_locked(&mut self, id: EnemyId, key: char) -> Vec<Notification> {
        let Some(enemy) = self.roster.get_mut(id) else {
            warn!(enemy = id, "locked enemy is missing");
            self.score.miss();
            return vec![Notification::KeyRejected { key }];
        };

        match enemy.matcher.submit_key(key) {
            KeyOutcome::Rejected => {
                self.score.miss();
                vec![Notification::KeyRejected { key }]
            }
            KeyOutcome::Continuing {
                confirmed,
                predicted,
            } => {
                self.score.hit();
                vec![Notification::KeyAccepted {
                    key,
                    enemy: id,
                    typed: enemy.matcher.typed(),
                    confirmed,
                    predicted,
                }]
            }
            KeyOutcome::Complete => {
                self.score.hit();
                let confirmed = enemy.matcher.confirmed().to_string();
                let points = enemy.point;
                self.roster.remove(id);
                self.score.score += u64::from(points);
                debug!(enemy = id, points, "destroyed");
                vec![
                    Notification::KeyAccepted {
                        key,
                        enemy: id,
                        typed: confirmed.clone(),
                        confirmed,
                        predicted: String::new(),
                    },
                    Notification::Destroyed { enemy: id, points },
                ]
            }
        }
    }
}
