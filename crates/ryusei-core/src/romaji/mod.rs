//! Kana-to-romaji spelling table.
//!
//! Maps each hiragana unit (a single kana or a two-kana yōon such as `しゃ`)
//! to every romaji spelling a player may type for it. The graph builder
//! layers the context rules for っ and ん on top of this table.

mod config;
mod table;

pub use config::{parse_kana_toml, KanaTableError};
pub use table::{default_toml, KanaTable, DEFAULT_TOML};
