use std::collections::{HashMap, VecDeque};

use tracing::debug_span;

use super::{GraphError, Node, NodeId, RomajiGraph, Token, END, START};

const UNREACHED: u32 = u32::MAX;

/// Incremental constructor for a `RomajiGraph`.
///
/// Node ids are handed out in insertion order after the two sentinels.
/// Successor order is edge insertion order; it decides shortest-path ties.
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<(NodeId, NodeId)>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Start, Node::End],
            edges: Vec::new(),
        }
    }

    pub fn add_token(&mut self, spellings: Vec<String>, kana_end: usize) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::Token(Token {
            spellings,
            kana_end,
        }));
        id
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.push((from, to));
    }

    /// Convenience for a single-path graph: one token per spelling group.
    pub fn linear<I, S>(groups: I) -> Result<RomajiGraph, GraphError>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let mut b = Self::new();
        let mut prev = START;
        for (i, group) in groups.into_iter().enumerate() {
            let id = b.add_token(group.into_iter().map(Into::into).collect(), i + 1);
            b.add_edge(prev, id);
            prev = id;
        }
        b.add_edge(prev, END);
        b.build()
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<RomajiGraph, GraphError> {
        let _span = debug_span!("graph_build", nodes = self.nodes.len()).entered();
        let n = self.nodes.len();

        for (id, node) in self.nodes.iter().enumerate() {
            if let Node::Token(t) = node {
                if t.spellings.is_empty() {
                    return Err(GraphError::NoSpellings(id as NodeId));
                }
                if t.spellings.iter().any(String::is_empty) {
                    return Err(GraphError::EmptySpelling(id as NodeId));
                }
            }
        }

        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        for &(from, to) in &self.edges {
            for id in [from, to] {
                if id as usize >= n {
                    return Err(GraphError::UnknownNode(id));
                }
            }
            if to == START {
                return Err(GraphError::EdgeIntoStart(from));
            }
            if from == END {
                return Err(GraphError::EdgeFromEnd(to));
            }
            if from == to {
                return Err(GraphError::Cycle(from));
            }
            if successors[from as usize].contains(&to) {
                return Err(GraphError::DuplicateEdge(from, to));
            }
            successors[from as usize].push(to);
            in_degree[to as usize] += 1;
        }

        let order = topological_order(&successors, &mut in_degree)?;

        // Reachability from Start.
        let mut reachable = vec![false; n];
        reachable[START as usize] = true;
        for &id in &order {
            if reachable[id as usize] {
                for &s in &successors[id as usize] {
                    reachable[s as usize] = true;
                }
            }
        }
        if let Some(id) = (2..n).find(|&i| !reachable[i]) {
            return Err(GraphError::Unreachable(id as NodeId));
        }

        // Distances in reverse topological order.
        let mut distance = vec![UNREACHED; n];
        let mut next: Vec<Option<NodeId>> = vec![None; n];
        distance[END as usize] = 0;
        for &id in order.iter().rev() {
            if id == END {
                continue;
            }
            let mut best: Option<(u32, NodeId)> = None;
            for &s in &successors[id as usize] {
                let d = distance[s as usize];
                if d == UNREACHED {
                    continue;
                }
                if best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, s));
                }
            }
            if let Some((d, s)) = best {
                let own = u32::from(matches!(self.nodes[id as usize], Node::Token(_)));
                distance[id as usize] = d + own;
                next[id as usize] = Some(s);
            }
        }
        if let Some(id) = (0..n).find(|&i| i != END as usize && distance[i] == UNREACHED) {
            return Err(GraphError::DeadEnd(id as NodeId));
        }

        check_sibling_spellings(&self.nodes, &successors)?;

        let shortest = self
            .nodes
            .iter()
            .map(|node| match node {
                Node::Token(t) => shortest_index(&t.spellings),
                Node::Start | Node::End => 0,
            })
            .collect();

        Ok(RomajiGraph {
            nodes: self.nodes,
            successors,
            distance,
            next,
            shortest,
        })
    }
}

/// Kahn's algorithm; a leftover node means a cycle.
fn topological_order(
    successors: &[Vec<NodeId>],
    in_degree: &mut [usize],
) -> Result<Vec<NodeId>, GraphError> {
    let n = successors.len();
    let mut queue: VecDeque<NodeId> = (0..n)
        .filter(|&i| in_degree[i] == 0)
        .map(|i| i as NodeId)
        .collect();
    let mut order = Vec::with_capacity(n);
    while let Some(id) = queue.pop_front() {
        order.push(id);
        for &s in &successors[id as usize] {
            in_degree[s as usize] -= 1;
            if in_degree[s as usize] == 0 {
                queue.push_back(s);
            }
        }
    }
    if order.len() < n {
        let stuck = (2..n).find(|&i| in_degree[i] > 0).unwrap_or(0);
        return Err(GraphError::Cycle(stuck as NodeId));
    }
    Ok(order)
}

/// Two siblings with the same spelling would both match exactly on the same
/// input, which the matcher cannot disambiguate.
fn check_sibling_spellings(nodes: &[Node], successors: &[Vec<NodeId>]) -> Result<(), GraphError> {
    for (parent, succ) in successors.iter().enumerate() {
        let mut seen: HashMap<&str, NodeId> = HashMap::new();
        for &s in succ {
            let Node::Token(t) = &nodes[s as usize] else {
                continue;
            };
            for spelling in &t.spellings {
                if let Some(&other) = seen.get(spelling.as_str()) {
                    if other != s {
                        return Err(GraphError::AmbiguousSpelling {
                            parent: parent as NodeId,
                            spelling: spelling.clone(),
                        });
                    }
                }
                seen.insert(spelling.as_str(), s);
            }
        }
    }
    Ok(())
}

fn shortest_index(spellings: &[String]) -> usize {
    let mut best = 0;
    for (i, s) in spellings.iter().enumerate() {
        if s.len() < spellings[best].len() {
            best = i;
        }
    }
    best
}
