use std::sync::Arc;

use ryusei_core::matcher::KeyMatcher;
use ryusei_core::vocab::{WordEntry, WordId};

use crate::types::{EnemyId, EnemyView};

/// One falling word.
pub(crate) struct Enemy {
    pub id: EnemyId,
    pub word: WordId,
    pub reading: String,
    pub display: String,
    pub first_kana: char,
    /// Keys the enemy was registered under while unlocked.
    pub first_keys: Vec<char>,
    pub matcher: KeyMatcher,
    /// Remaining distance to the target.
    pub distance: f64,
    pub point: u32,
}

impl Enemy {
    pub fn new(id: EnemyId, word: WordId, entry: &WordEntry, distance: f64, point: u32) -> Self {
        let matcher = KeyMatcher::new(Arc::clone(&entry.graph));
        Self {
            id,
            word,
            reading: entry.reading.clone(),
            display: entry.display.clone(),
            first_kana: entry.first_kana(),
            first_keys: matcher.acceptable_keys(),
            matcher,
            distance,
            point,
        }
    }

    /// Move toward the target. Returns true once it has arrived.
    pub fn advance(&mut self, speed: f64) -> bool {
        self.distance -= speed;
        self.distance <= 0.0
    }

    pub fn view(&self, locked: bool, spawn_distance: f64) -> EnemyView {
        EnemyView {
            id: self.id,
            word: self.word,
            display: self.display.clone(),
            reading: self.reading.clone(),
            confirmed: self.matcher.confirmed().to_string(),
            typed: self.matcher.typed(),
            predicted: self.matcher.predicted().to_string(),
            acceptable_keys: self.matcher.acceptable_keys(),
            locked,
            position: (self.distance / spawn_distance).clamp(0.0, 1.0),
        }
    }
}
