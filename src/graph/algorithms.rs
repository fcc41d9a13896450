//! Graph algorithms for analysis

use crate::graph::model::{Graph, NodeId};
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};

impl Graph {
    /// Breadth-first layers around `id`: `layers[k]` holds the nodes at exactly `k`
    /// hops, sorted by key. Stops after `depth` layers or when the frontier empties.
    pub fn layers(&self, id: NodeId, depth: usize) -> Vec<Vec<NodeId>> {
        if self.node(id).is_none() {
            return Vec::new();
        }

        let mut seen = HashSet::from([id]);
        let mut layers = vec![vec![id]];

        while layers.len() <= depth {
            let mut next: Vec<NodeId> = Vec::new();
            for &node in &layers[layers.len() - 1] {
                for nbr in self.adjacent(node) {
                    if seen.insert(nbr) {
                        next.push(nbr);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            next.sort_unstable();
            layers.push(next);
        }

        layers
    }

    /// Degree at a given depth: incident edges for `depth == 1`, otherwise the
    /// number of nodes at exactly `depth` hops.
    pub fn degree_at(&self, id: NodeId, depth: usize) -> usize {
        if depth <= 1 {
            return self.degree(id);
        }
        self.layers(id, depth).get(depth).map_or(0, Vec::len)
    }

    /// Nodes at exactly `depth` hops from `id`. With `other`, only the nodes that are
    /// also at exactly `depth` hops from `other`.
    pub fn neighbors(&self, id: NodeId, other: Option<NodeId>, depth: usize) -> Vec<NodeId> {
        let depth = depth.max(1);
        let ring = self.layers(id, depth).into_iter().nth(depth).unwrap_or_default();

        match other {
            None => ring,
            Some(other) => {
                let other_ring: HashSet<NodeId> = self
                    .layers(other, depth)
                    .into_iter()
                    .nth(depth)
                    .unwrap_or_default()
                    .into_iter()
                    .collect();
                ring.into_iter().filter(|n| other_ring.contains(n)).collect()
            }
        }
    }

    /// Closed ball: `id` plus every node within `depth` hops, sorted by key
    pub fn neighborhood(&self, id: NodeId, depth: usize) -> Vec<NodeId> {
        let mut ball: Vec<NodeId> = self.layers(id, depth).into_iter().flatten().collect();
        ball.sort_unstable();
        ball
    }

    /// Connected component of `id` as a new, independent graph
    pub fn expand(&self, id: NodeId) -> Graph {
        let mut visited = HashSet::new();
        let mut component = Vec::new();
        let mut queue = VecDeque::new();

        if self.node(id).is_some() {
            visited.insert(id);
            queue.push_back(id);
        }

        while let Some(node) = queue.pop_front() {
            component.push(node);
            for nbr in self.adjacent(node) {
                if visited.insert(nbr) {
                    queue.push_back(nbr);
                }
            }
        }

        self.subgraph(&component)
    }

    /// Edge density `2|E| / (n(n-1))`. Graphs with fewer than two nodes are
    /// infinitely dense so they always pass an acceptance threshold.
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return f64::INFINITY;
        }
        (2 * self.edge_count()) as f64 / (n * (n - 1)) as f64
    }

    /// Mean local clustering coefficient over nodes with degree of at least two
    pub fn cluster_coefficient(&self) -> f64 {
        if self.node_count() < 2 {
            return 0.0;
        }

        let mut total = 0.0;
        let mut counted = 0usize;

        for &node in self.nodes() {
            let deg = self.degree(node);
            if deg < 2 {
                continue;
            }

            let nbrs: Vec<NodeId> = self.adjacent(node).collect();
            let links = nbrs
                .iter()
                .tuple_combinations()
                .filter(|&(&a, &b)| self.has_edge(a, b))
                .count();

            total += (2 * links) as f64 / (deg * (deg - 1)) as f64;
            counted += 1;
        }

        if counted == 0 {
            0.0
        } else {
            total / counted as f64
        }
    }
}
