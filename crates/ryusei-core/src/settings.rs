//! Global settings loaded from TOML, following the same OnceLock pattern as the kana table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

/// How keys arriving faster than one per tick are queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Buffer every key; one is processed per tick.
    #[default]
    Fifo,
    /// Only the newest unprocessed key survives.
    Latest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub battle: BattleSettings,
    pub enemy: EnemySettings,
    pub result: ResultSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BattleSettings {
    pub fps: u32,
    pub battle_seconds: u32,
    pub spawn_seconds: f64,
    pub max_health: u32,
    pub key_policy: KeyPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySettings {
    pub point: u32,
    pub spawn_distance: f64,
    pub speed_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSettings {
    pub raw_score_ratio: f64,
    pub accuracy_ratio: f64,
    pub residues_ratio: f64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive_f64 {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.is_finite() || s.$section.$field <= 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a positive number".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_negative_f64 {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.is_finite() || s.$section.$field < 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }

    check_positive!(battle.fps);
    check_positive!(battle.battle_seconds);
    check_positive_f64!(battle.spawn_seconds);
    check_positive!(battle.max_health);

    check_positive!(enemy.point);
    check_positive_f64!(enemy.spawn_distance);
    check_positive_f64!(enemy.speed_ratio);

    check_non_negative_f64!(result.raw_score_ratio);
    check_non_negative_f64!(result.accuracy_ratio);
    check_non_negative_f64!(result.residues_ratio);

    Ok(())
}
