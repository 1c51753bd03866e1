use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_kana_toml, KanaTableError};

pub const DEFAULT_TOML: &str = include_str!("default_kana.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default kana table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

#[derive(Debug, Clone)]
pub struct KanaTable {
    units: BTreeMap<String, Vec<String>>,
}

impl KanaTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), KanaTableError> {
        // Validate eagerly
        parse_kana_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| KanaTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KanaTable {
        static INSTANCE: OnceLock<KanaTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let units = parse_kana_toml(toml_str).expect("kana TOML must be valid");
            KanaTable { units }
        })
    }

    /// Build a standalone table, bypassing the global singleton.
    pub fn from_toml(toml_str: &str) -> Result<Self, KanaTableError> {
        Ok(Self {
            units: parse_kana_toml(toml_str)?,
        })
    }

    pub fn spellings(&self, unit: &str) -> Option<&[String]> {
        self.units.get(unit).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
