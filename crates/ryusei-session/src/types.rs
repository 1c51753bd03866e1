use serde::Serialize;

use ryusei_core::settings::{KeyPolicy, Settings};
use ryusei_core::vocab::WordId;

/// Identifies one spawned enemy for the lifetime of a battle. Never reused.
pub type EnemyId = u32;

/// Tick-based battle parameters derived from `Settings`.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleConfig {
    /// The battle ends on the first tick past this one.
    pub end_ticks: u64,
    pub spawn_ticks: u64,
    pub max_health: u32,
    pub point: u32,
    pub spawn_distance: f64,
    /// Distance covered per tick.
    pub speed: f64,
    pub key_policy: KeyPolicy,
    pub seed: u64,
    pub ratios: ResultRatios,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRatios {
    pub raw_score: f64,
    pub accuracy: f64,
    pub residues: f64,
}

impl BattleConfig {
    pub fn from_settings(s: &Settings, seed: u64) -> Self {
        let fps = f64::from(s.battle.fps);
        Self {
            end_ticks: u64::from(s.battle.fps) * u64::from(s.battle.battle_seconds),
            spawn_ticks: ((fps * s.battle.spawn_seconds).round() as u64).max(1),
            max_health: s.battle.max_health,
            point: s.enemy.point,
            spawn_distance: s.enemy.spawn_distance,
            speed: s.enemy.spawn_distance * s.enemy.speed_ratio / fps,
            key_policy: s.battle.key_policy,
            seed,
            ratios: ResultRatios {
                raw_score: s.result.raw_score_ratio,
                accuracy: s.result.accuracy_ratio,
                residues: s.result.residues_ratio,
            },
        }
    }
}

/// State change reported by `Battle::tick`. An empty list means nothing happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    Spawned {
        enemy: EnemyId,
        word: WordId,
        display: String,
        predicted: String,
    },
    /// Every first kana was excluded; this spawn tick was skipped.
    SpawnSkipped,
    Locked {
        enemy: EnemyId,
    },
    KeyAccepted {
        key: char,
        enemy: EnemyId,
        confirmed: String,
        /// `confirmed` plus keys toward a not yet completed unit.
        typed: String,
        predicted: String,
    },
    KeyRejected {
        key: char,
    },
    Destroyed {
        enemy: EnemyId,
        points: u32,
    },
    /// The enemy reached the target: one point of damage.
    Collided {
        enemy: EnemyId,
        health: u32,
    },
    Finished(BattleResult),
}

/// Read-only per-enemy projection for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub word: WordId,
    pub display: String,
    pub reading: String,
    pub confirmed: String,
    /// `confirmed` plus keys toward a not yet completed unit.
    pub typed: String,
    pub predicted: String,
    pub acceptable_keys: Vec<char>,
    pub locked: bool,
    /// Remaining distance as a fraction of the spawn distance, in [0, 1].
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattleResult {
    pub score: u64,
    /// Percentage with two decimals.
    pub accuracy: f64,
    /// Health left at the end.
    pub residues: u32,
    pub total: u64,
}
