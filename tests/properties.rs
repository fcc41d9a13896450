use bridgecut::{analyze, build_graph, BridgeCut, Config, Graph, PathSets, Strategy as CutStrategy};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn edges_strategy(max_nodes: u8, max_edges: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((0..max_nodes, 0..max_nodes), 1..max_edges).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (format!("n{}", a), format!("n{}", b)))
            .collect()
    })
}

/// A chain over every node plus random chords, so the graph is connected
fn connected_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    (2_u8..9).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..10).prop_map(move |chords| {
            let mut pairs: Vec<(String, String)> = (1..n)
                .map(|i| (format!("n{}", i - 1), format!("n{}", i)))
                .collect();
            pairs.extend(
                chords
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (format!("n{}", a), format!("n{}", b))),
            );
            pairs
        })
    })
}

fn strategy_choice() -> impl Strategy<Value = CutStrategy> {
    prop::sample::select(CutStrategy::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Density and clustering coefficient are never NaN or negative
    #[test]
    fn prop_graph_measures_are_well_defined(pairs in edges_strategy(8, 16)) {
        let graph = build_graph(pairs).unwrap();
        let density = graph.density();
        prop_assert!(!density.is_nan());
        prop_assert!(density >= 0.0);

        let cc = graph.cluster_coefficient();
        prop_assert!(!cc.is_nan());
        prop_assert!((0.0..=1.0).contains(&cc));
    }

    /// Every node leaves the live graph exactly once, inside exactly one cluster
    #[test]
    fn prop_clusters_partition_the_nodes(
        pairs in edges_strategy(8, 14),
        strategy in strategy_choice(),
        threshold in 0.1_f64..1.0,
        depth in 1_usize..3,
    ) {
        let graph = build_graph(pairs).unwrap();
        let config = Config::new(strategy, threshold, depth, 0.5);
        let clustering = BridgeCut::new(config).unwrap().run(&graph);

        let removed: usize = clustering.steps.iter().map(|s| s.removed).sum();
        prop_assert_eq!(removed, graph.node_count());

        let mut seen = BTreeSet::new();
        for cluster in &clustering.clusters {
            prop_assert!(cluster.node_count() > 0);
            for key in cluster.keys() {
                prop_assert!(seen.insert(key.to_string()), "{} clustered twice", key);
            }
        }
        let all: BTreeSet<String> = graph.keys().map(str::to_string).collect();
        prop_assert_eq!(seen, all);

        for step in &clustering.steps {
            prop_assert!(!step.cluster_coefficient.is_nan());
            // Rounds that find nothing left to cut score 0
            prop_assert!(step.score >= 0.0);
        }
    }

    /// Shortest-path distances do not depend on direction
    #[test]
    fn prop_distances_are_symmetric(pairs in edges_strategy(8, 16)) {
        let graph = build_graph(pairs).unwrap();
        let paths = PathSets::compute(&graph);
        for &a in graph.nodes() {
            for &b in graph.nodes() {
                if a != b {
                    prop_assert_eq!(paths.distance(a, b), paths.distance(b, a));
                }
            }
        }
    }

    /// Expanding any node of a connected graph reaches the whole graph
    #[test]
    fn prop_expand_covers_connected_graph(pairs in connected_strategy()) {
        let graph = build_graph(pairs).unwrap();
        for &node in graph.nodes() {
            let component = graph.expand(node);
            prop_assert_eq!(component.node_count(), graph.node_count());
            prop_assert_eq!(component.edge_count(), graph.edge_count());
        }
    }

    /// Two runs over the same input agree step for step
    #[test]
    fn prop_runs_are_deterministic(
        pairs in edges_strategy(7, 12),
        strategy in strategy_choice(),
    ) {
        let graph = build_graph(pairs.clone()).unwrap();
        let again = build_graph(pairs).unwrap();
        let config = Config::new(strategy, 0.6, 2, 0.5);

        let first = analyze(&graph, &config).unwrap();
        let second = analyze(&again, &config).unwrap();

        prop_assert_eq!(&first.steps, &second.steps);
        prop_assert_eq!(&first.clusters, &second.clusters);
        prop_assert_eq!(first.davies_bouldin.to_bits(), second.davies_bouldin.to_bits());
        prop_assert_eq!(first.silhouette.to_bits(), second.silhouette.to_bits());
    }
}

#[test]
fn empty_graph_scores() {
    let report = analyze(&Graph::new(), &Config::default()).unwrap();
    assert!(report.steps.is_empty());
    assert!(report.clusters.is_empty());
    assert_eq!(report.davies_bouldin, f64::INFINITY);
    assert_eq!(report.silhouette, 0.0);
}
