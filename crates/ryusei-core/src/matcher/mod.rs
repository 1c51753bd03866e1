//! Incremental romaji matching against a word's romanization graph.
//!
//! `KeyMatcher` keeps every graph node that is still consistent with the
//! keys typed so far (the frontier) and, after each accepted key, derives
//! the set of acceptable next keys and the shortest continuation to show.


use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug_span, trace, warn};

use crate::graph::{NodeId, RomajiGraph, END, START};

/// Result of feeding one key to a `KeyMatcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key does not extend any live spelling. Nothing changed.
    Rejected,
    /// Accepted; the word is not finished yet.
    Continuing { confirmed: String, predicted: String },
    /// Accepted; this key finished the word.
    Complete,
}

impl KeyOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

pub struct KeyMatcher {
    graph: Arc<RomajiGraph>,
    /// Nodes consistent with the input so far, in successor-list order.
    frontier: Vec<NodeId>,
    /// Keys typed toward the frontier nodes that complete none of them yet.
    partial: String,
    /// Spellings of every fully matched node, in order.
    confirmed: String,
    predicted: String,
    /// Set right after a lone `n` completed a node that also accepts `nn`.
    allow_trailing_n: bool,
    accepting: BTreeSet<char>,
}

impl KeyMatcher {
    pub fn new(graph: Arc<RomajiGraph>) -> Self {
        let frontier = graph.successors(START).to_vec();
        let mut m = Self {
            graph,
            frontier,
            partial: String::new(),
            confirmed: String::new(),
            predicted: String::new(),
            allow_trailing_n: false,
            accepting: BTreeSet::new(),
        };
        m.update_accepting();
        m.update_predicted();
        m
    }

    pub fn graph(&self) -> &RomajiGraph {
        &self.graph
    }

    pub fn frontier(&self) -> &[NodeId] {
        &self.frontier
    }

    pub fn confirmed(&self) -> &str {
        &self.confirmed
    }

    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Everything typed so far: confirmed nodes plus the pending partial.
    pub fn typed(&self) -> String {
        format!("{}{}", self.confirmed, self.partial)
    }

    pub fn predicted(&self) -> &str {
        &self.predicted
    }

    pub fn allows_trailing_n(&self) -> bool {
        self.allow_trailing_n
    }

    pub fn is_complete(&self) -> bool {
        self.frontier == [END]
    }

    pub fn accepts(&self, key: char) -> bool {
        (self.allow_trailing_n && key == 'n') || self.accepting.contains(&key)
    }

    /// Keys that would be accepted next, sorted. Includes the extra `n`
    /// while a trailing `n` is allowed.
    pub fn acceptable_keys(&self) -> Vec<char> {
        let mut keys = self.accepting.clone();
        if self.allow_trailing_n {
            keys.insert('n');
        }
        keys.into_iter().collect()
    }

    /// Feed one key.
    pub fn submit_key(&mut self, key: char) -> KeyOutcome {
        let _span = debug_span!("submit_key", %key, partial = %self.partial).entered();

        if self.allow_trailing_n && key == 'n' {
            // Second half of `nn`. The node already advanced on the first `n`.
            self.allow_trailing_n = false;
            self.confirmed.push('n');
            trace!(confirmed = %self.confirmed, "trailing n");
            return self.accepted();
        }

        if !self.accepting.contains(&key) {
            trace!("rejected");
            return KeyOutcome::Rejected;
        }
        self.allow_trailing_n = false;

        let mut candidate = self.partial.clone();
        candidate.push(key);

        let mut exact = self
            .frontier
            .iter()
            .copied()
            .filter(|&id| self.graph.spellings(id).iter().any(|s| *s == candidate));

        if let Some(done) = exact.next() {
            if let Some(other) = exact.next() {
                warn!(done, other, %candidate, "several nodes matched exactly; keeping the first");
            }
            self.allow_trailing_n =
                candidate == "n" && self.graph.spellings(done).iter().any(|s| s == "nn");
            self.confirmed.push_str(&candidate);
            self.partial.clear();
            self.frontier = self.graph.successors(done).to_vec();
        } else {
            let graph = &self.graph;
            self.frontier
                .retain(|&id| graph.spellings(id).iter().any(|s| s.starts_with(&candidate)));
            self.partial = candidate;
        }

        self.update_accepting();
        if self.is_complete() {
            self.allow_trailing_n = false;
            self.predicted.clear();
            trace!(confirmed = %self.confirmed, "complete");
            return KeyOutcome::Complete;
        }
        self.update_predicted();
        self.accepted()
    }

    fn accepted(&self) -> KeyOutcome {
        KeyOutcome::Continuing {
            confirmed: self.confirmed.clone(),
            predicted: self.predicted.clone(),
        }
    }

    fn update_accepting(&mut self) {
        let graph = &self.graph;
        let partial = self.partial.as_str();
        self.accepting = self
            .frontier
            .iter()
            .flat_map(|&id| graph.spellings(id))
            .filter_map(|s| s.strip_prefix(partial)?.chars().next())
            .collect();
    }

    /// Remainder of the best spelling of the closest frontier node, then the
    /// shortest spelling of every later node on its shortest path.
    fn update_predicted(&mut self) {
        self.predicted.clear();
        let Some(head) = self.graph.closest_to_end(&self.frontier) else {
            return;
        };
        let path = self.graph.shortest_path(head);
        let Some((&first, rest)) = path.split_first() else {
            return;
        };

        if self.partial.is_empty() {
            self.predicted.push_str(self.graph.shortest_spelling(first));
        } else if let Some(spelling) = self
            .graph
            .spellings(first)
            .iter()
            .filter(|s| s.starts_with(&self.partial))
            .min_by_key(|s| s.len())
        {
            self.predicted.push_str(&spelling[self.partial.len()..]);
        }
        for &id in rest {
            self.predicted.push_str(self.graph.shortest_spelling(id));
        }
    }
}
