use std::fs;
use std::process;

use ryusei_core::romaji::{self, KanaTable};
use ryusei_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install user-supplied kana and settings tables before anything reads them.
pub fn install_overrides(kana: Option<&str>, settings_file: Option<&str>) {
    if let Some(file) = kana {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(KanaTable::init_custom(content), "Error loading kana table: {}");
    }
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error loading settings: {}");
    }
}

pub fn kana_export() {
    print!("{}", romaji::default_toml());
}

pub fn kana_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(romaji::parse_kana_toml(&content), "Error: {}");
    let spellings: usize = map.values().map(Vec::len).sum();
    println!("OK: {} units, {spellings} spellings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: battle.fps={}, battle.battle_seconds={}, battle.spawn_seconds={}, enemy.point={}",
        s.battle.fps, s.battle.battle_seconds, s.battle.spawn_seconds, s.enemy.point
    );
}
