//! Betweenness scores: global (path-set based) and egocentric (contact matrix)

use crate::error::BridgeCutError;
use crate::graph::{EdgeId, Graph, NodeId, PathSets};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which betweenness family a strategy ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetweennessKind {
    /// Shortest-path fractions over every pair in the live graph
    Global,
    /// Local approximation from the item's immediate neighborhood
    Egocentric,
}

impl fmt::Display for BetweennessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetweennessKind::Global => f.write_str("global"),
            BetweennessKind::Egocentric => f.write_str("egocentric"),
        }
    }
}

impl FromStr for BetweennessKind {
    type Err = BridgeCutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(BetweennessKind::Global),
            "egocentric" | "ego" => Ok(BetweennessKind::Egocentric),
            other => Err(BridgeCutError::UnknownBetweenness(other.to_string())),
        }
    }
}

/// Sum over pairs of other nodes of the share of their shortest paths that pass
/// through `node`. Unreachable pairs contribute nothing.
pub fn node_betweenness(paths: &PathSets, node: NodeId) -> f64 {
    paths
        .pairs()
        .filter(|&(a, b, _)| a != node && b != node)
        .map(|(_, _, set)| {
            let routes = set.paths();
            if routes.is_empty() {
                return 0.0;
            }
            let through = routes.iter().filter(|route| route.contains(&node)).count();
            through as f64 / routes.len() as f64
        })
        .sum()
}

/// Sum over pairs of the share of their shortest paths that contain both endpoints
/// of the edge. The pair's own endpoints count as on the path, so an edge always
/// collects 1.0 from the pair it joins directly.
pub fn edge_betweenness(graph: &Graph, paths: &PathSets, edge: EdgeId) -> f64 {
    let Some((u, v)) = graph.edge(edge).map(|e| e.endpoints()) else {
        return 0.0;
    };

    paths
        .pairs()
        .map(|(a, b, set)| {
            let routes = set.paths();
            if routes.is_empty() {
                return 0.0;
            }
            let on_path = |route: &Vec<NodeId>, x: NodeId| x == a || x == b || route.contains(&x);
            let through = routes
                .iter()
                .filter(|route| on_path(route, u) && on_path(route, v))
                .count();
            through as f64 / routes.len() as f64
        })
        .sum()
}

/// Symmetric 0/1 adjacency matrix over `members`
pub fn contact_matrix(graph: &Graph, members: &[NodeId]) -> Array2<f64> {
    let k = members.len();
    let mut contact = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in i + 1..k {
            if graph.has_edge(members[i], members[j]) {
                contact[[i, j]] = 1.0;
                contact[[j, i]] = 1.0;
            }
        }
    }
    contact
}

/// Egocentric betweenness of a node.
///
/// Works on the contact matrix `A` of the node and its neighbors: every pair of
/// neighbors that is not directly linked adds `1 / (A²)ᵢⱼ`, the node's share of the
/// two-step walks joining them.
pub fn ego_node_betweenness(graph: &Graph, node: NodeId) -> f64 {
    let ego = graph.neighborhood(node, 1);
    if ego.len() < 3 {
        return 0.0;
    }

    let contact = contact_matrix(graph, &ego);
    let walks = contact.dot(&contact);

    let mut score = 0.0;
    for i in 0..ego.len() {
        if ego[i] == node {
            continue;
        }
        for j in i + 1..ego.len() {
            if ego[j] == node || contact[[i, j]] > 0.0 {
                continue;
            }
            if walks[[i, j]] > 0.0 {
                score += 1.0 / walks[[i, j]];
            }
        }
    }
    score
}

/// Egocentric betweenness of an edge.
///
/// The ego network is the union of both endpoints' closed neighborhoods. The edge
/// scores 1.0 for the pair it joins, plus for each neighbor `x` of one endpoint that
/// is not adjacent to the other, `1 / (A²)` between `x` and that other endpoint: the
/// share of two-hop routes that run across this edge.
pub fn ego_edge_betweenness(graph: &Graph, edge: EdgeId) -> f64 {
    let Some((u, v)) = graph.edge(edge).map(|e| e.endpoints()) else {
        return 0.0;
    };

    let mut ego = graph.neighborhood(u, 1);
    ego.extend(graph.neighborhood(v, 1));
    ego.sort_unstable();
    ego.dedup();

    let contact = contact_matrix(graph, &ego);
    let walks = contact.dot(&contact);
    let pos = |id: NodeId| ego.binary_search(&id).ok();

    let mut score = 1.0;
    for (near, far) in [(u, v), (v, u)] {
        let Some(far_pos) = pos(far) else { continue };
        for x in graph.adjacent(near) {
            if x == far || graph.has_edge(x, far) {
                continue;
            }
            if let Some(x_pos) = pos(x) {
                let routes = walks[[far_pos, x_pos]];
                if routes > 0.0 {
                    score += 1.0 / routes;
                }
            }
        }
    }
    score
}
