use tracing::debug_span;

use super::{GraphBuilder, GraphError, NodeId, RomajiGraph, END, START};
use crate::romaji::KanaTable;

const SOKUON: char = 'っ';
const HATSUON: char = 'ん';

/// A candidate token: kana span `[start, end)` plus its spellings.
struct Unit {
    end: usize,
    spellings: Vec<String>,
}

/// Build the romanization graph for a hiragana reading.
///
/// Units are segmented the same way a conversion lattice is: every table
/// entry that matches at a char position becomes a node spanning its kana,
/// and nodes are linked to every node that starts where they end.
pub fn build_reading_graph(reading: &str, table: &KanaTable) -> Result<RomajiGraph, GraphError> {
    let chars: Vec<char> = reading.chars().collect();
    let len = chars.len();
    let _span = debug_span!("build_reading_graph", len).entered();
    if len == 0 {
        return Err(GraphError::EmptyReading);
    }

    let mut units_by_start: Vec<Vec<Unit>> = (0..len).map(|_| Vec::new()).collect();
    for start in 0..len {
        for span in 1..=2 {
            if start + span > len {
                break;
            }
            let kana: String = chars[start..start + span].iter().collect();
            if let Some(spellings) = table.spellings(&kana) {
                units_by_start[start].push(Unit {
                    end: start + span,
                    spellings: spellings.to_vec(),
                });
            }
        }
    }

    // Right to left so that っっ can double an already doubled unit.
    for start in (0..len.saturating_sub(1)).rev() {
        if chars[start] != SOKUON {
            continue;
        }
        let doubled: Vec<Unit> = units_by_start[start + 1]
            .iter()
            .filter_map(|u| {
                let spellings: Vec<String> = u
                    .spellings
                    .iter()
                    .filter_map(|s| {
                        let c = s.chars().next().filter(|&c| is_doublable(c))?;
                        Some(format!("{c}{s}"))
                    })
                    .collect();
                (!spellings.is_empty()).then_some(Unit {
                    end: u.end,
                    spellings,
                })
            })
            .collect();
        units_by_start[start].extend(doubled);
    }

    for start in 0..len {
        if chars[start] != HATSUON || start + 1 >= len {
            continue;
        }
        let single_n_ok = !units_by_start[start + 1].is_empty()
            && units_by_start[start + 1]
                .iter()
                .flat_map(|u| u.spellings.iter())
                .all(|s| s.chars().next().is_some_and(allows_single_n_before));
        if !single_n_ok {
            continue;
        }
        for unit in units_by_start[start]
            .iter_mut()
            .filter(|u| u.end == start + 1)
        {
            if !unit.spellings.iter().any(|s| s == "n") {
                unit.spellings.insert(0, "n".to_string());
            }
        }
    }

    // Keep only units on some complete segmentation of the reading.
    let mut reachable = vec![false; len + 1];
    reachable[0] = true;
    for start in 0..len {
        if reachable[start] {
            for u in &units_by_start[start] {
                reachable[u.end] = true;
            }
        }
    }
    let mut complete = vec![false; len + 1];
    complete[len] = true;
    for start in (0..len).rev() {
        complete[start] = units_by_start[start].iter().any(|u| complete[u.end]);
    }
    if !complete[0] {
        let position = (0..len)
            .find(|&p| reachable[p] && units_by_start[p].is_empty())
            .or_else(|| (0..len).rev().find(|&p| reachable[p] && !complete[p]))
            .unwrap_or(0);
        return Err(GraphError::UnknownKana {
            reading: reading.to_string(),
            position,
            kana: chars[position],
        });
    }

    let mut b = GraphBuilder::new();
    let mut nodes_by_start: Vec<Vec<NodeId>> = vec![Vec::new(); len + 1];
    let mut placed: Vec<(NodeId, usize)> = Vec::new();
    for (start, units) in units_by_start.into_iter().enumerate() {
        if !reachable[start] {
            continue;
        }
        for u in units {
            if !complete[u.end] {
                continue;
            }
            let id = b.add_token(u.spellings, u.end);
            nodes_by_start[start].push(id);
            placed.push((id, u.end));
        }
    }

    for &id in &nodes_by_start[0] {
        b.add_edge(START, id);
    }
    for &(id, end) in &placed {
        if end == len {
            b.add_edge(id, END);
        } else {
            for &next in &nodes_by_start[end] {
                b.add_edge(id, next);
            }
        }
    }

    b.build()
}

/// Consonants that っ may double. Vowels, n and the explicit small-kana
/// prefixes l/x are excluded.
fn is_doublable(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o' | 'n' | 'l' | 'x')
}

/// A lone `n` reads as ん only when the next key cannot continue it into
/// another kana.
fn allows_single_n_before(c: char) -> bool {
    !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o' | 'y' | 'n')
}
