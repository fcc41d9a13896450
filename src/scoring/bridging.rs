//! Depth-limited bridging coefficients

use crate::graph::{EdgeId, Graph, NodeId};
use std::collections::HashSet;

/// Bridging coefficient of a node at the given depth.
///
/// Takes the nodes at exactly `depth` hops and, for each one with degree above one,
/// the fraction of its remaining edges that leave the radius-`depth` neighborhood.
/// The sum is averaged over that ring; an empty ring scores 0.0.
pub fn node_bridging(graph: &Graph, node: NodeId, depth: usize) -> f64 {
    let depth = depth.max(1);
    let layers = graph.layers(node, depth);
    let ring = match layers.get(depth) {
        Some(ring) if !ring.is_empty() => ring,
        _ => return 0.0,
    };

    let ball: HashSet<NodeId> = layers.iter().flatten().copied().collect();

    let total: f64 = ring
        .iter()
        .filter_map(|&member| {
            let deg = graph.degree(member);
            if deg <= 1 {
                return None;
            }
            let leaving = graph.adjacent(member).filter(|n| !ball.contains(n)).count();
            Some(leaving as f64 / (deg - 1) as f64)
        })
        .sum();

    // Empty sums are -0.0
    total / ring.len() as f64 + 0.0
}

/// Bridging coefficient of an edge: its endpoints' coefficients weighted by their
/// depth-`depth` degree, damped by the number of shared neighbors at that depth.
pub fn edge_bridging(graph: &Graph, edge: EdgeId, depth: usize) -> f64 {
    let Some((u, v)) = graph.edge(edge).map(|e| e.endpoints()) else {
        return 0.0;
    };

    let du = graph.degree_at(u, depth) as f64;
    let dv = graph.degree_at(v, depth) as f64;
    let shared = graph.neighbors(u, Some(v), depth).len() as f64;

    let den = (du + dv) * (shared + 1.0);
    if den == 0.0 {
        return 0.0;
    }

    (du * node_bridging(graph, u, depth) + dv * node_bridging(graph, v, depth)) / den
}
