mod basic;
mod keys;

use std::sync::Arc;

use ryusei_core::romaji::KanaTable;
use ryusei_core::settings::KeyPolicy;
use ryusei_core::vocab::Vocabulary;

use super::{Battle, BattleConfig, Notification, ResultRatios};

pub(super) fn make_vocab(words: &[(&str, &str)]) -> Arc<Vocabulary> {
    let mut toml = String::new();
    for (reading, display) in words {
        toml.push_str(&format!(
            "[[words]]\nreading = \"{reading}\"\ndisplay = \"{display}\"\n\n"
        ));
    }
    Arc::new(Vocabulary::from_toml(&toml, KanaTable::global()).unwrap())
}

/// No automatic spawns, no movement, a long deadline.
pub(super) fn quiet_config() -> BattleConfig {
    BattleConfig {
        end_ticks: 10_000,
        spawn_ticks: 10_000,
        max_health: 5,
        point: 100,
        spawn_distance: 1.0,
        speed: 0.0,
        key_policy: KeyPolicy::Fifo,
        seed: 0,
        ratios: ResultRatios {
            raw_score: 1.0,
            accuracy: 100.0,
            residues: 100.0,
        },
    }
}

pub(super) fn make_battle(words: &[(&str, &str)]) -> Battle {
    Battle::new(make_vocab(words), quiet_config())
}

// Helper: one tick per key, notifications concatenated
pub(super) fn type_string(battle: &mut Battle, s: &str) -> Vec<Notification> {
    let mut out = Vec::new();
    for ch in s.chars() {
        out.extend(battle.tick(&[ch]));
    }
    out
}
