//! Cluster validity metrics

use crate::graph::{Graph, NodeId, PathSets};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;

/// Longest shortest-path distance inside a cluster, measured on its own edges
pub fn diameter(cluster: &Graph) -> f64 {
    if cluster.node_count() <= 1 {
        return 0.0;
    }

    PathSets::compute(cluster)
        .pairs()
        .filter(|(_, _, set)| set.is_reachable())
        .map(|(_, _, set)| set.distance())
        .fold(0.0, f64::max)
}

/// Member ids of each cluster, resolved against `graph` by key
fn resolve_members(graph: &Graph, clusters: &[Graph]) -> Vec<Vec<NodeId>> {
    clusters
        .iter()
        .map(|cluster| cluster.keys().filter_map(|key| graph.lookup(key)).collect())
        .collect()
}

fn mean_distance(paths: &PathSets, from: &[NodeId], to: &[NodeId]) -> f64 {
    let count = from.len() * to.len();
    if count == 0 {
        return f64::INFINITY;
    }
    let total: f64 = from
        .iter()
        .cartesian_product(to.iter())
        .map(|(&a, &b)| paths.distance(a, b))
        .sum();
    total / count as f64
}

/// Davies-Bouldin style index over graph distances.
///
/// Undefined (infinite) for fewer than two clusters or when every cluster is a
/// singleton. Cluster spread is the diameter on the cluster's own edges and the
/// separation of two clusters is their mean pairwise distance in `graph`, which
/// must be the unmutated input graph.
pub fn davies_bouldin(graph: &Graph, clusters: &[Graph]) -> f64 {
    if clusters.len() < 2 || clusters.iter().all(|c| c.node_count() <= 1) {
        return f64::INFINITY;
    }

    let diameters: Vec<f64> = clusters.par_iter().map(diameter).collect();
    let paths = PathSets::compute(graph);
    let members = resolve_members(graph, clusters);

    let k = clusters.len();
    let mut separation = vec![vec![f64::INFINITY; k]; k];
    for (i, j) in (0..k).tuple_combinations() {
        let sep = mean_distance(&paths, &members[i], &members[j]);
        separation[i][j] = sep;
        separation[j][i] = sep;
    }

    let total: f64 = (0..k)
        .map(|i| {
            (0..k)
                .filter(|&j| j != i)
                .map(|j| {
                    let sep = separation[i][j];
                    if sep.is_infinite() || sep == 0.0 {
                        0.0
                    } else {
                        (diameters[i] + diameters[j]) / sep
                    }
                })
                .fold(0.0, f64::max)
        })
        .sum();

    total / k as f64
}

/// Mean silhouette coefficient over every node of `graph`.
///
/// For each node `a` is the mean distance to the rest of its own cluster and `b`
/// the smallest mean distance to another cluster; the node scores
/// `(b - a) / max(a, b)`. A node alone in its cluster has `a = 0`, a clustering
/// with one cluster has `b = 0`, and `max(a, b) = 0` scores 0. Clusters that
/// cannot reach each other count as perfectly separated.
pub fn silhouette(graph: &Graph, clusters: &[Graph]) -> f64 {
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return 0.0;
    }

    let paths = PathSets::compute(graph);
    let members = resolve_members(graph, clusters);

    let mut membership: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    for (idx, cluster) in members.iter().enumerate() {
        for &node in cluster {
            membership.insert(node, idx);
        }
    }

    let scores: Vec<f64> = nodes
        .par_iter()
        .map(|&node| {
            let own = membership.get(&node).copied();

            let a = match own {
                Some(idx) if members[idx].len() > 1 => {
                    let others: Vec<NodeId> =
                        members[idx].iter().copied().filter(|&n| n != node).collect();
                    mean_distance(&paths, &[node], &others)
                }
                _ => 0.0,
            };

            let b = members
                .iter()
                .enumerate()
                .filter(|&(idx, cluster)| Some(idx) != own && !cluster.is_empty())
                .map(|(_, cluster)| mean_distance(&paths, &[node], cluster))
                .reduce(f64::min)
                .unwrap_or(0.0);

            match (a.is_infinite(), b.is_infinite()) {
                (false, true) => 1.0,
                (true, false) => -1.0,
                (true, true) => 0.0,
                (false, false) => {
                    let spread = a.max(b);
                    if spread == 0.0 {
                        0.0
                    } else {
                        (b - a) / spread
                    }
                }
            }
        })
        .collect();

    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    fn bowtie() -> Graph {
        build_graph([
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "D"),
        ])
        .unwrap()
    }

    fn clusters_of(graph: &Graph, groups: &[&[&str]]) -> Vec<Graph> {
        groups
            .iter()
            .map(|keys| {
                let ids: Vec<NodeId> = keys.iter().filter_map(|k| graph.lookup(k)).collect();
                graph.subgraph(&ids)
            })
            .collect()
    }

    #[test]
    fn test_diameter() {
        let path = build_graph([("A", "B"), ("B", "C"), ("C", "D")]).unwrap();
        assert_eq!(diameter(&path), 3.0);
        assert_eq!(diameter(&Graph::new()), 0.0);
        assert_eq!(diameter(&bowtie()), 3.0);
    }

    #[test]
    fn test_davies_bouldin_undefined_cases() {
        let graph = bowtie();
        let one = clusters_of(&graph, &[&["A", "B", "C", "D", "E", "F"]]);
        assert_eq!(davies_bouldin(&graph, &one), f64::INFINITY);

        let singles = clusters_of(&graph, &[&["A"], &["B"], &["C"], &["D"], &["E"], &["F"]]);
        assert_eq!(davies_bouldin(&graph, &singles), f64::INFINITY);
    }

    #[test]
    fn test_davies_bouldin_two_triangles() {
        let graph = bowtie();
        let clusters = clusters_of(&graph, &[&["A", "B", "C"], &["D", "E", "F"]]);
        // Diameters 1 + 1 over a mean separation of 21 / 9
        let expected = 2.0 / (21.0 / 9.0);
        assert!((davies_bouldin(&graph, &clusters) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_davies_bouldin_disconnected_clusters() {
        let graph = build_graph([("A", "B"), ("C", "D")]).unwrap();
        let clusters = clusters_of(&graph, &[&["A", "B"], &["C", "D"]]);
        assert_eq!(davies_bouldin(&graph, &clusters), 0.0);
    }

    #[test]
    fn test_silhouette_two_triangles() {
        let graph = bowtie();
        let clusters = clusters_of(&graph, &[&["A", "B", "C"], &["D", "E", "F"]]);
        // Outer nodes score 5/8, the bridge endpoints 2/5
        let expected = (4.0 * 5.0 / 8.0 + 2.0 * 2.0 / 5.0) / 6.0;
        assert!((silhouette(&graph, &clusters) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_silhouette_single_cluster_and_empty() {
        let triangle = build_graph([("A", "B"), ("B", "C"), ("C", "A")]).unwrap();
        let clusters = clusters_of(&triangle, &[&["A", "B", "C"]]);
        assert_eq!(silhouette(&triangle, &clusters), -1.0);

        assert_eq!(silhouette(&Graph::new(), &[]), 0.0);
    }

    #[test]
    fn test_silhouette_singletons_and_unreachable() {
        let pair = build_graph([("A", "B")]).unwrap();
        let clusters = clusters_of(&pair, &[&["A"], &["B"]]);
        // a = 0, b = 1 for both nodes
        assert_eq!(silhouette(&pair, &clusters), 1.0);

        let split = build_graph([("A", "B"), ("C", "D")]).unwrap();
        let clusters = clusters_of(&split, &[&["A", "B"], &["C", "D"]]);
        assert_eq!(silhouette(&split, &clusters), 1.0);
    }
}
