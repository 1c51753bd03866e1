//! Battle coordinator: spawns enemies, routes keystrokes, and scores the result.
//!
//! `Battle` owns every piece of mutable game state and is driven by `tick`,
//! which takes the keys typed during one frame and returns what changed.
//! Rendering and audio read the returned notifications and `views()`; they
//! never mutate the battle.

mod types;

mod enemy;
mod key_handlers;
mod roster;
mod score;
mod tick;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::sync::Arc;

use ryusei_core::selector::WordSelector;
use ryusei_core::vocab::Vocabulary;

pub use score::Scoreboard;
pub use types::{BattleConfig, BattleResult, EnemyId, EnemyView, Notification, ResultRatios};

use roster::Roster;

pub struct Battle {
    vocab: Arc<Vocabulary>,
    config: BattleConfig,
    selector: WordSelector,
    roster: Roster,
    score: Scoreboard,
    health: u32,
    tick: u64,
    next_enemy: EnemyId,
    /// Keys received but not processed yet.
    pending: VecDeque<char>,
    result: Option<BattleResult>,
}

impl Battle {
    pub fn new(vocab: Arc<Vocabulary>, config: BattleConfig) -> Self {
        let selector = WordSelector::new(&vocab, config.seed);
        Self {
            health: config.max_health,
            vocab,
            config,
            selector,
            roster: Roster::default(),
            score: Scoreboard::default(),
            tick: 0,
            next_enemy: 0,
            pending: VecDeque::new(),
            result: None,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Ticks processed so far.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.score
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    /// The enemy currently receiving keystrokes.
    pub fn locked(&self) -> Option<EnemyId> {
        self.roster.locked()
    }

    pub fn enemy_count(&self) -> usize {
        self.roster.len()
    }

    pub fn pending_keys(&self) -> usize {
        self.pending.len()
    }

    pub fn selector(&self) -> &WordSelector {
        &self.selector
    }

    /// Per-enemy projection in spawn order.
    pub fn views(&self) -> Vec<EnemyView> {
        let locked = self.roster.locked();
        self.roster
            .iter()
            .map(|e| e.view(locked == Some(e.id), self.config.spawn_distance))
            .collect()
    }

    pub fn view(&self, id: EnemyId) -> Option<EnemyView> {
        let locked = self.roster.locked() == Some(id);
        self.roster
            .get(id)
            .map(|e| e.view(locked, self.config.spawn_distance))
    }
}
