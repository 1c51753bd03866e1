//! Romanization graphs.
//!
//! Every vocabulary word owns an immutable DAG whose Start→End paths spell
//! out every accepted romaji input for the word. Nodes live in a flat table
//! addressed by `NodeId`; `START` and `END` are fixed sentinels at index 0
//! and 1. Shortest distances to End are computed once at build time.

mod builder;
mod kana;

pub use builder::GraphBuilder;
pub use kana::build_reading_graph;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub type NodeId = u32;

pub const START: NodeId = 0;
pub const END: NodeId = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("empty reading")]
    EmptyReading,
    #[error("no spelling for {kana:?} at position {position} of {reading}")]
    UnknownKana {
        reading: String,
        position: usize,
        kana: char,
    },
    #[error("node {0} has no spellings")]
    NoSpellings(NodeId),
    #[error("node {0} has an empty spelling")]
    EmptySpelling(NodeId),
    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),
    #[error("edge into start node from {0}")]
    EdgeIntoStart(NodeId),
    #[error("edge out of end node to {0}")]
    EdgeFromEnd(NodeId),
    #[error("duplicate edge {0} -> {1}")]
    DuplicateEdge(NodeId, NodeId),
    #[error("cycle through node {0}")]
    Cycle(NodeId),
    #[error("node {0} is unreachable from start")]
    Unreachable(NodeId),
    #[error("node {0} has no path to end")]
    DeadEnd(NodeId),
    #[error("successors of node {parent} share spelling {spelling:?}")]
    AmbiguousSpelling { parent: NodeId, spelling: String },
}

/// One unit of romaji input: interchangeable spellings of the same kana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub spellings: Vec<String>,
    /// Char index in the reading right after this unit. Diagnostic only.
    pub kana_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Start,
    End,
    Token(Token),
}

/// Flat serialized form used by the compiled vocabulary format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Token nodes in id order, starting at id 2.
    pub tokens: Vec<Token>,
    pub edges: Vec<(NodeId, NodeId)>,
}

#[derive(Debug, Clone)]
pub struct RomajiGraph {
    nodes: Vec<Node>,
    successors: Vec<Vec<NodeId>>,
    /// Token nodes on the shortest path to End, counting the node itself.
    /// `u32::MAX` never survives `build()`.
    distance: Vec<u32>,
    /// Successor taken by the tie-broken shortest path; `None` for End.
    next: Vec<Option<NodeId>>,
    /// Index of the shortest spelling per token (first on ties).
    shortest: Vec<usize>,
}

impl RomajiGraph {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id as usize]
    }

    /// Spellings of a token node; empty for Start and End.
    pub fn spellings(&self, id: NodeId) -> &[String] {
        match self.node(id) {
            Node::Token(t) => &t.spellings,
            Node::Start | Node::End => &[],
        }
    }

    pub fn kana_end(&self, id: NodeId) -> Option<usize> {
        match self.node(id) {
            Node::Token(t) => Some(t.kana_end),
            Node::Start | Node::End => None,
        }
    }

    pub fn distance(&self, id: NodeId) -> u32 {
        self.distance[id as usize]
    }

    /// Shortest spelling of a token node (empty for Start and End).
    pub fn shortest_spelling(&self, id: NodeId) -> &str {
        self.spellings(id)
            .get(self.shortest[id as usize])
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Pick the frontier node that starts the shortest remaining path.
    ///
    /// Ties go to the node listed first, which is the order the nodes appear
    /// in their predecessor's successor list.
    pub fn closest_to_end(&self, frontier: &[NodeId]) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &id in frontier {
            match best {
                Some(b) if self.distance(b) <= self.distance(id) => {}
                _ => best = Some(id),
            }
        }
        best
    }

    /// Token nodes on the precomputed shortest path, starting at `from`
    /// (inclusive when it is a token) and stopping before End.
    pub fn shortest_path(&self, from: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = Some(from);
        while let Some(id) = cur {
            if matches!(self.node(id), Node::Token(_)) {
                path.push(id);
            }
            cur = self.next[id as usize];
        }
        path
    }

    /// Keys that can start the word.
    pub fn first_keys(&self) -> BTreeSet<char> {
        self.successors(START)
            .iter()
            .flat_map(|&id| self.spellings(id))
            .filter_map(|s| s.chars().next())
            .collect()
    }

    /// Concatenated shortest spellings along the shortest path from Start.
    pub fn shortest_spelling_from_start(&self) -> String {
        self.shortest_path(START)
            .into_iter()
            .map(|id| self.shortest_spelling(id))
            .collect()
    }

    /// Every full input spelling of the word, in path order.
    ///
    /// Exponential in the number of alternatives; meant for diagnostics and
    /// tests on single words.
    pub fn all_spellings(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        self.collect_spellings(START, &mut prefix, &mut out);
        out
    }

    fn collect_spellings(&self, id: NodeId, prefix: &mut String, out: &mut Vec<String>) {
        if id == END {
            out.push(prefix.clone());
            return;
        }
        let spellings: &[String] = match self.node(id) {
            Node::Token(t) => &t.spellings,
            _ => &[],
        };
        if spellings.is_empty() {
            for &succ in self.successors(id) {
                self.collect_spellings(succ, prefix, out);
            }
            return;
        }
        for spelling in spellings {
            let len = prefix.len();
            prefix.push_str(spelling);
            for &succ in self.successors(id) {
                self.collect_spellings(succ, prefix, out);
            }
            prefix.truncate(len);
        }
    }

    pub fn to_record(&self) -> GraphRecord {
        let tokens = self
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Token(t) => Some(t.clone()),
                _ => None,
            })
            .collect();
        let edges = self
            .successors
            .iter()
            .enumerate()
            .flat_map(|(from, succ)| succ.iter().map(move |&to| (from as NodeId, to)))
            .collect();
        GraphRecord { tokens, edges }
    }

    pub fn from_record(record: GraphRecord) -> Result<Self, GraphError> {
        let mut b = GraphBuilder::new();
        for token in record.tokens {
            b.add_token(token.spellings, token.kana_end);
        }
        for (from, to) in record.edges {
            b.add_edge(from, to);
        }
        b.build()
    }
}
