use std::fs;
use std::path::Path;
use std::process;

use ryusei_core::romaji::KanaTable;
use ryusei_core::vocab::{VocabError, Vocabulary};

use super::graph_ops::pad;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Vocab { path: String, source: VocabError },
}

/// Load a vocabulary from a compiled `.bin` (detected by magic) or a TOML
/// word list. `None` selects the embedded default list.
pub fn load_vocab(path: Option<&str>) -> Result<Vocabulary, LoadError> {
    let Some(path) = path else {
        return Vocabulary::default_embedded().map_err(|source| LoadError::Vocab {
            path: "<embedded>".into(),
            source,
        });
    };
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    let vocab_err = |source| LoadError::Vocab {
        path: path.to_string(),
        source,
    };
    if data.starts_with(b"RYVB") {
        return Vocabulary::from_bytes(&data).map_err(vocab_err);
    }
    let text = String::from_utf8(data).map_err(|e| LoadError::Io {
        path: path.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    Vocabulary::from_toml(&text, KanaTable::global()).map_err(vocab_err)
}

pub fn compile(input_file: &str, output_file: &str) {
    let vocab = die!(load_vocab(Some(input_file)), "Error loading vocabulary: {}");
    die!(
        vocab.save(Path::new(output_file)),
        "Error writing vocabulary: {}"
    );
    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({} words, {:.1} KB)",
        vocab.len(),
        file_size as f64 / 1024.0
    );
}

pub fn info(file: Option<&str>) {
    let vocab = die!(load_vocab(file), "Error loading vocabulary: {}");
    let groups = vocab.by_first_kana();
    let nodes: usize = vocab.iter().map(|w| w.graph.node_count()).sum();

    println!("Vocabulary: {}", file.unwrap_or("<embedded>"));
    println!("Words:      {}", vocab.len());
    println!("First kana: {}", groups.len());
    println!("Nodes:      {nodes}");
    println!();

    let width = vocab
        .iter()
        .map(|w| unicode_width::UnicodeWidthStr::width(w.reading.as_str()))
        .max()
        .unwrap_or(0)
        + 2;
    for (kana, ids) in &groups {
        println!("{kana} ({})", ids.len());
        for &id in ids {
            let w = vocab.entry(id);
            println!(
                "  {}{}{}",
                pad(&w.reading, width),
                pad(&w.display, width),
                w.graph.shortest_spelling_from_start()
            );
        }
    }
}
