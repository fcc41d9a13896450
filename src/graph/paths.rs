//! All-pairs shortest paths over the live graph

use crate::graph::model::{Graph, NodeId};
use rayon::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Every shortest path between one unordered pair of nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSet {
    /// No path joins the pair
    Unreachable,

    /// Intermediate nodes of each shortest path, endpoints excluded. A single
    /// empty path means the pair is joined by a direct edge.
    Paths(Vec<Vec<NodeId>>),
}

impl PathSet {
    /// Whether at least one path exists
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathSet::Paths(paths) if !paths.is_empty())
    }

    /// The shortest paths; empty when unreachable
    pub fn paths(&self) -> &[Vec<NodeId>] {
        match self {
            PathSet::Unreachable => &[],
            PathSet::Paths(paths) => paths,
        }
    }

    /// Hop count of a shortest path, or infinity when unreachable
    pub fn distance(&self) -> f64 {
        self.paths()
            .first()
            .map_or(f64::INFINITY, |path| (path.len() + 1) as f64)
    }
}

/// Shortest-path sets for every unordered pair of live nodes.
///
/// Each pair is computed once and stored in an upper-triangular table indexed by
/// the nodes' positions in key order; lookups in either direction hit the same
/// entry. Intermediates are listed walking from the earlier node to the later one.
#[derive(Debug, Clone)]
pub struct PathSets {
    nodes: Vec<NodeId>,
    position: HashMap<NodeId, usize>,
    entries: Vec<PathSet>,
}

impl PathSets {
    /// Run one breadth-first search per live node. Searches only read the graph, so
    /// they are spread over the rayon pool.
    pub fn compute(graph: &Graph) -> Self {
        let nodes = graph.nodes().to_vec();
        let position: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();

        let rows: Vec<Vec<PathSet>> = (0..nodes.len())
            .into_par_iter()
            .map(|source| shortest_paths_from(graph, &nodes, source))
            .collect();

        let entries: Vec<PathSet> = rows.into_iter().flatten().collect();

        log::trace!(
            "Computed path sets for {} nodes ({} pairs)",
            nodes.len(),
            entries.len()
        );

        Self {
            nodes,
            position,
            entries,
        }
    }

    /// Node ids covered by this table, in key order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        let n = self.nodes.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Path set between two distinct nodes of the table
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<&PathSet> {
        let pa = *self.position.get(&a)?;
        let pb = *self.position.get(&b)?;
        if pa == pb {
            return None;
        }
        let (i, j) = if pa < pb { (pa, pb) } else { (pb, pa) };
        self.entries.get(self.slot(i, j))
    }

    /// Shortest-path distance; infinity when unreachable or either node is unknown
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.get(a, b).map_or(f64::INFINITY, PathSet::distance)
    }

    /// Every unordered pair with its path set, earlier node first
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId, &PathSet)> + '_ {
        let n = self.nodes.len();
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .zip(self.entries.iter())
            .map(move |((i, j), entry)| (self.nodes[i], self.nodes[j], entry))
    }
}

/// BFS from `nodes[source]` collecting every shortest path to each later node
fn shortest_paths_from(graph: &Graph, nodes: &[NodeId], source: usize) -> Vec<PathSet> {
    let src = nodes[source];

    let mut dist: HashMap<NodeId, usize> = HashMap::from([(src, 0)]);
    let mut preds: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    let mut discovered = Vec::new();
    let mut queue = VecDeque::from([src]);

    // Level-order search, keeping every predecessor on a shortest route
    while let Some(node) = queue.pop_front() {
        let next = dist[&node] + 1;
        for nbr in graph.adjacent(node) {
            match dist.get(&nbr) {
                // First time seen
                None => {
                    dist.insert(nbr, next);
                    preds.insert(nbr, vec![node]);
                    discovered.push(nbr);
                    queue.push_back(nbr);
                }
                // Another route of the same length
                Some(&d) if d == next => {
                    preds.entry(nbr).or_default().push(node);
                }
                Some(_) => {}
            }
        }
    }

    // Build intermediate lists in discovery order so predecessors are always ready
    let mut routes: HashMap<NodeId, Vec<Vec<NodeId>>> = HashMap::with_capacity(discovered.len());
    for &node in &discovered {
        let mut node_routes = Vec::new();
        for &pred in preds.get(&node).map(Vec::as_slice).unwrap_or_default() {
            if pred == src {
                node_routes.push(Vec::new());
            } else if let Some(pred_routes) = routes.get(&pred) {
                node_routes.extend(pred_routes.iter().map(|route| {
                    let mut extended = route.clone();
                    extended.push(pred);
                    extended
                }));
            }
        }
        routes.insert(node, node_routes);
    }

    // Only later nodes are stored; the table is upper-triangular
    nodes[source + 1..]
        .iter()
        .map(|target| match routes.remove(target) {
            Some(paths) if !paths.is_empty() => PathSet::Paths(paths),
            _ => PathSet::Unreachable,
        })
        .collect()
}
