use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct KanaConfig {
    units: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum KanaTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[units] table is empty")]
    Empty,
    #[error("unit must be one or two kana: {0}")]
    UnitLength(String),
    #[error("no spellings for unit: {0}")]
    NoSpellings(String),
    #[error("empty spelling for unit: {0}")]
    EmptySpelling(String),
    #[error("non-ASCII spelling for unit {unit}: {spelling}")]
    NonAsciiSpelling { unit: String, spelling: String },
    #[error("kana table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<kana unit, spellings>`.
///
/// Spelling order is preserved; it decides which spelling is displayed when
/// two spellings have the same length.
pub fn parse_kana_toml(
    toml_str: &str,
) -> Result<BTreeMap<String, Vec<String>>, KanaTableError> {
    let config: KanaConfig =
        toml::from_str(toml_str).map_err(|e| KanaTableError::Parse(e.to_string()))?;

    if config.units.is_empty() {
        return Err(KanaTableError::Empty);
    }

    for (unit, spellings) in &config.units {
        let len = unit.chars().count();
        if len == 0 || len > 2 {
            return Err(KanaTableError::UnitLength(unit.clone()));
        }
        if spellings.is_empty() {
            return Err(KanaTableError::NoSpellings(unit.clone()));
        }
        for spelling in spellings {
            if spelling.is_empty() {
                return Err(KanaTableError::EmptySpelling(unit.clone()));
            }
            if !spelling.is_ascii() {
                return Err(KanaTableError::NonAsciiSpelling {
                    unit: unit.clone(),
                    spelling: spelling.clone(),
                });
            }
        }
    }

    Ok(config.units)
}
