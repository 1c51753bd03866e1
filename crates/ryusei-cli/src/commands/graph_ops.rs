use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use ryusei_core::graph::{build_reading_graph, GraphError, Node, NodeId, RomajiGraph};
use ryusei_core::romaji::KanaTable;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize)]
pub struct NodeRow {
    pub id: NodeId,
    /// `start`, `end`, or the kana the token spells.
    pub label: String,
    pub spellings: Vec<String>,
    pub successors: Vec<NodeId>,
    pub distance: u32,
}

#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub reading: String,
    pub nodes: Vec<NodeRow>,
    pub predicted: String,
    pub first_keys: Vec<char>,
    pub spellings: Vec<String>,
}

/// Build the graph for `reading` and collect everything worth printing.
pub fn graph_report(reading: &str, table: &KanaTable) -> Result<GraphReport, GraphError> {
    let graph = build_reading_graph(reading, table)?;
    let chars: Vec<char> = reading.chars().collect();
    let starts = token_starts(&graph);

    let nodes = (0..graph.node_count() as NodeId)
        .map(|id| {
            let label = match graph.node(id) {
                Node::Start => "start".to_string(),
                Node::End => "end".to_string(),
                Node::Token(t) => {
                    let from = starts[id as usize].unwrap_or(0);
                    chars[from..t.kana_end].iter().collect()
                }
            };
            NodeRow {
                id,
                label,
                spellings: graph.spellings(id).to_vec(),
                successors: graph.successors(id).to_vec(),
                distance: graph.distance(id),
            }
        })
        .collect();

    Ok(GraphReport {
        reading: reading.to_string(),
        nodes,
        predicted: graph.shortest_spelling_from_start(),
        first_keys: graph.first_keys().into_iter().collect(),
        spellings: graph.all_spellings(),
    })
}

/// Char index where each token starts: the `kana_end` of any predecessor.
fn token_starts(graph: &RomajiGraph) -> Vec<Option<usize>> {
    let mut starts = vec![None; graph.node_count()];
    for from in 0..graph.node_count() as NodeId {
        let begin = graph.kana_end(from).unwrap_or(0);
        for &to in graph.successors(from) {
            starts[to as usize].get_or_insert(begin);
        }
    }
    starts
}

/// Left-align `s` in a column `width` terminal cells wide.
pub fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

pub fn graph(reading: &str, json: bool) {
    let report = die!(
        graph_report(reading, KanaTable::global()),
        "Error building graph: {}"
    );

    if json {
        let text = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{text}");
        return;
    }

    println!("Reading:    {}", report.reading);
    println!("Predicted:  {}", report.predicted);
    let keys: Vec<String> = report.first_keys.iter().map(char::to_string).collect();
    println!("First keys: {}", keys.join(", "));
    println!();
    println!("  id  {}  dist  spellings -> successors", pad("kana", 6));
    for row in &report.nodes {
        let succ: Vec<String> = row.successors.iter().map(u32::to_string).collect();
        println!(
            "  {:>2}  {}  {:>4}  [{}] -> {}",
            row.id,
            pad(&row.label, 6),
            row.distance,
            row.spellings.join(", "),
            succ.join(", ")
        );
    }
    println!();
    println!("{} spellings:", report.spellings.len());
    for s in &report.spellings {
        println!("  {s}");
    }
}
