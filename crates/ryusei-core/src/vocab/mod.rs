//! Vocabulary: the static word list every battle draws enemies from.
//!
//! Words are loaded once, each with its romanization graph built up front,
//! and then shared read-only. Graphs are reference counted so that every
//! enemy spawned for a word points at the same graph.

mod vocab_io;

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug_span;

use crate::graph::{build_reading_graph, GraphError, RomajiGraph};
use crate::romaji::KanaTable;

pub const DEFAULT_VOCAB_TOML: &str = include_str!("default_vocab.toml");

/// Dense index into a `Vocabulary`.
pub type WordId = u32;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected RYVB)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("word {reading}: {source}")]
    Graph { reading: String, source: GraphError },

    #[error("vocabulary has no words")]
    Empty,

    #[error("duplicate reading: {0}")]
    DuplicateReading(String),
}

#[derive(Debug, Clone)]
pub struct WordEntry {
    /// Hiragana reading the graph was built from.
    pub reading: String,
    /// Form shown on the enemy, usually with kanji.
    pub display: String,
    pub graph: Arc<RomajiGraph>,
}

impl WordEntry {
    /// The kana that decides selection exclusion. Readings are never empty.
    pub fn first_kana(&self) -> char {
        self.reading.chars().next().unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct VocabSource {
    words: Vec<WordSource>,
}

#[derive(Deserialize)]
struct WordSource {
    reading: String,
    display: String,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<WordEntry>,
}

impl Vocabulary {
    /// Parse a `[[words]]` TOML list and build a graph for every reading.
    pub fn from_toml(toml_str: &str, table: &KanaTable) -> Result<Self, VocabError> {
        let source: VocabSource =
            toml::from_str(toml_str).map_err(|e| VocabError::Parse(e.to_string()))?;
        let _span = debug_span!("vocab_from_toml", words = source.words.len()).entered();

        let entries = source
            .words
            .into_iter()
            .map(|w| {
                let graph = build_reading_graph(&w.reading, table).map_err(|source| {
                    VocabError::Graph {
                        reading: w.reading.clone(),
                        source,
                    }
                })?;
                Ok((w.reading, w.display, graph))
            })
            .collect::<Result<Vec<_>, VocabError>>()?;
        Self::from_entries(entries)
    }

    /// Assemble a vocabulary from graphs built elsewhere.
    pub fn from_entries(entries: Vec<(String, String, RomajiGraph)>) -> Result<Self, VocabError> {
        if entries.is_empty() {
            return Err(VocabError::Empty);
        }
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(entries.len());
        for (reading, display, graph) in entries {
            if reading.is_empty() {
                return Err(VocabError::Graph {
                    reading,
                    source: GraphError::EmptyReading,
                });
            }
            if !seen.insert(reading.clone()) {
                return Err(VocabError::DuplicateReading(reading));
            }
            out.push(WordEntry {
                reading,
                display,
                graph: Arc::new(graph),
            });
        }
        Ok(Self { entries: out })
    }

    /// The word list compiled into the crate.
    pub fn default_embedded() -> Result<Self, VocabError> {
        Self::from_toml(DEFAULT_VOCAB_TOML, KanaTable::global())
    }

    /// Panics on an id not handed out by this vocabulary.
    pub fn entry(&self, id: WordId) -> &WordEntry {
        &self.entries[id as usize]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Word ids grouped by first kana, ids ascending within a group.
    pub fn by_first_kana(&self) -> BTreeMap<char, Vec<WordId>> {
        let mut groups: BTreeMap<char, Vec<WordId>> = BTreeMap::new();
        for (id, entry) in self.entries.iter().enumerate() {
            groups.entry(entry.first_kana()).or_default().push(id as WordId);
        }
        groups
    }
}
