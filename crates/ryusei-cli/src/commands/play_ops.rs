use std::process;
use std::sync::Arc;

use ryusei_core::settings::{self, KeyPolicy};
use ryusei_core::vocab::Vocabulary;
use ryusei_session::{Battle, BattleConfig, Notification};

use super::vocab_ops::load_vocab;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Run a battle without a frame clock: one enemy up front, then one tick
/// per key. The battle is finished once the keys run out, so the last
/// notification is always `Finished`.
pub fn run_headless(vocab: Arc<Vocabulary>, config: BattleConfig, keys: &str) -> Vec<Notification> {
    let mut battle = Battle::new(vocab, config);
    let mut out = vec![battle.spawn()];
    for key in keys.chars() {
        if battle.is_finished() {
            break;
        }
        out.extend(battle.tick(&[key]));
    }
    if !battle.is_finished() {
        out.push(Notification::Finished(battle.finish()));
    }
    out
}

pub fn play(vocab_file: Option<&str>, seed: u64, policy: Option<KeyPolicy>, keys: &str) {
    let vocab = die!(load_vocab(vocab_file), "Error loading vocabulary: {}");
    let mut config = BattleConfig::from_settings(settings::settings(), seed);
    if let Some(policy) = policy {
        config.key_policy = policy;
    }

    for notification in run_headless(Arc::new(vocab), config, keys) {
        let line = die!(serde_json::to_string(&notification), "Error: {}");
        println!("{line}");
    }
}
