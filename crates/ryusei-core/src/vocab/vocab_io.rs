use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug_span;

use super::{VocabError, Vocabulary};
use crate::graph::{GraphRecord, RomajiGraph};

const MAGIC: &[u8; 4] = b"RYVB";
const VERSION: u8 = 1;
/// magic(4) + version(1) + reserved(3) + crc32(4)
const HEADER_SIZE: usize = 12;

#[derive(Serialize, Deserialize)]
struct VocabData {
    words: Vec<WordRecord>,
}

#[derive(Serialize, Deserialize)]
struct WordRecord {
    reading: String,
    display: String,
    graph: GraphRecord,
}

impl Vocabulary {
    /// Serialize to bytes (RYVB format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, VocabError> {
        let data = VocabData {
            words: self
                .entries
                .iter()
                .map(|e| WordRecord {
                    reading: e.reading.clone(),
                    display: e.display.clone(),
                    graph: e.graph.to_record(),
                })
                .collect(),
        };
        let body = bincode::serialize(&data).map_err(VocabError::Serialize)?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0; 3]);
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (RYVB format). Every graph is validated again.
    pub fn from_bytes(data: &[u8]) -> Result<Self, VocabError> {
        let _span = debug_span!("vocab_from_bytes", len = data.len()).entered();
        if data.len() < HEADER_SIZE {
            return Err(VocabError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(VocabError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(VocabError::UnsupportedVersion(data[4]));
        }
        let expected = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        let body = &data[HEADER_SIZE..];
        let actual = crc32fast::hash(body);
        if actual != expected {
            return Err(VocabError::ChecksumMismatch { expected, actual });
        }

        let decoded: VocabData = bincode::deserialize(body).map_err(VocabError::Deserialize)?;
        let entries = decoded
            .words
            .into_iter()
            .map(|w| {
                let graph = RomajiGraph::from_record(w.graph).map_err(|source| {
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

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), VocabError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn open(path: &Path) -> Result<Self, VocabError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
