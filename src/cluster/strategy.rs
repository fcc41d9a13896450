//! Selection strategies: which bridge gets cut next

use crate::config::Config;
use crate::error::BridgeCutError;
use crate::graph::{Graph, NodeId, PathSets};
use crate::scoring::{
    dense_ranks, edge_betweenness, edge_bridging, ego_edge_betweenness, ego_node_betweenness,
    node_betweenness, node_bridging, tiebreak, BetweennessKind,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four BridgeCut variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Cut the edge with the highest betweenness rank
    EdgeBetweenness,
    /// Cut the edge with the highest betweenness x bridging rank
    EdgeBridging,
    /// Cut the vertex with the highest betweenness rank
    VertexBetweenness,
    /// Cut the vertex with the highest betweenness x bridging rank
    VertexBridging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Universe {
    Edges,
    Vertices,
}

impl Strategy {
    /// Every strategy, in a fixed order
    pub const ALL: [Strategy; 4] = [
        Strategy::EdgeBetweenness,
        Strategy::EdgeBridging,
        Strategy::VertexBetweenness,
        Strategy::VertexBridging,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::EdgeBetweenness => "edge-betweenness",
            Strategy::EdgeBridging => "edge-bridging",
            Strategy::VertexBetweenness => "vertex-betweenness",
            Strategy::VertexBridging => "vertex-bridging",
        }
    }

    /// Betweenness family used unless the configuration overrides it
    pub fn default_betweenness(&self) -> BetweennessKind {
        match self {
            Strategy::EdgeBridging => BetweennessKind::Egocentric,
            _ => BetweennessKind::Global,
        }
    }

    fn universe(&self) -> Universe {
        match self {
            Strategy::EdgeBetweenness | Strategy::EdgeBridging => Universe::Edges,
            Strategy::VertexBetweenness | Strategy::VertexBridging => Universe::Vertices,
        }
    }

    fn uses_bridging(&self) -> bool {
        matches!(self, Strategy::EdgeBridging | Strategy::VertexBridging)
    }

    /// Pick the best-ranked item of the live graph and cut it.
    ///
    /// An edge is detached from both endpoints. A vertex loses every incident edge
    /// but stays in the graph as an isolated node, so the loop turns it into its own
    /// singleton cluster. Returns `None` only for an empty graph.
    pub fn split(&self, graph: &mut Graph, config: &Config) -> Option<Split> {
        let anchor = *graph.nodes().first()?;
        let kind = config.betweenness_kind();

        match self.universe() {
            Universe::Edges => {
                let Some((edge, score)) = select(graph, Universe::Edges, kind, self.uses_bridging(), config) else {
                    return Some(Split::exhausted(graph, anchor));
                };
                let item = match graph.edge_keys(edge) {
                    Some((a, b)) => Item::Edge(a.to_string(), b.to_string()),
                    None => return Some(Split::exhausted(graph, anchor)),
                };
                let cut = match graph.destroy_edge(edge) {
                    Some((a, b)) => Cut::Separated(vec![a, b]),
                    None => Cut::Exhausted(anchor),
                };
                Some(Split { item, score, cut })
            }
            Universe::Vertices => {
                let (node, score) = select(graph, Universe::Vertices, kind, self.uses_bridging(), config)?;
                let item = Item::Vertex(graph.key(node).unwrap_or_default().to_string());

                let neighbors = graph.detach_node(node);
                let cut = if neighbors.is_empty() {
                    Cut::Exhausted(node)
                } else {
                    let mut affected = Vec::with_capacity(neighbors.len() + 1);
                    affected.push(node);
                    affected.extend(neighbors);
                    Cut::Separated(affected)
                };
                Some(Split { item, score, cut })
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = BridgeCutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edge-betweenness" | "edge-b" => Ok(Strategy::EdgeBetweenness),
            "edge-bridging" | "edge-c" => Ok(Strategy::EdgeBridging),
            "vertex-betweenness" | "vertex-b" => Ok(Strategy::VertexBetweenness),
            "vertex-bridging" | "vertex-c" => Ok(Strategy::VertexBridging),
            _ => Err(BridgeCutError::UnknownStrategy(s.to_string())),
        }
    }
}

/// The element removed in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    /// An edge, by endpoint keys in sort order
    Edge(String, String),
    /// A vertex, by key
    Vertex(String),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Edge(a, b) => write!(f, "{} <-> {}", a, b),
            Item::Vertex(key) => f.write_str(key),
        }
    }
}

/// What a cut left behind for the expansion phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cut {
    /// Nodes directly touched by the cut, in the order they should be expanded
    Separated(Vec<NodeId>),
    /// Nothing was left to cut; this node is taken as a cluster as-is
    Exhausted(NodeId),
}

/// Outcome of one SPLIT step
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// The element that was removed
    pub item: Item,
    /// Ranking score that won the selection
    pub score: f64,
    /// Nodes to examine next
    pub cut: Cut,
}

impl Split {
    fn exhausted(graph: &Graph, node: NodeId) -> Self {
        Self {
            item: Item::Vertex(graph.key(node).unwrap_or_default().to_string()),
            score: 0.0,
            cut: Cut::Exhausted(node),
        }
    }
}

fn item_degree(graph: &Graph, universe: Universe, id: usize) -> usize {
    match universe {
        Universe::Edges => graph.edge_degree(id),
        Universe::Vertices => graph.degree(id),
    }
}

fn betweenness_scores(graph: &Graph, universe: Universe, ids: &[usize], kind: BetweennessKind) -> Vec<f64> {
    match (kind, universe) {
        (BetweennessKind::Global, _) => {
            let paths = PathSets::compute(graph);
            ids.par_iter()
                .map(|&id| match universe {
                    Universe::Edges => edge_betweenness(graph, &paths, id),
                    Universe::Vertices => node_betweenness(&paths, id),
                })
                .collect()
        }
        (BetweennessKind::Egocentric, Universe::Edges) => {
            ids.par_iter().map(|&id| ego_edge_betweenness(graph, id)).collect()
        }
        (BetweennessKind::Egocentric, Universe::Vertices) => {
            ids.par_iter().map(|&id| ego_node_betweenness(graph, id)).collect()
        }
    }
}

fn bridging_scores(graph: &Graph, universe: Universe, ids: &[usize], depth: usize) -> Vec<f64> {
    ids.par_iter()
        .map(|&id| match universe {
            Universe::Edges => edge_bridging(graph, id, depth),
            Universe::Vertices => node_bridging(graph, id, depth),
        })
        .collect()
}

/// Rank the universe and return the winning id with its ranking score
fn select(
    graph: &Graph,
    universe: Universe,
    kind: BetweennessKind,
    with_bridging: bool,
    config: &Config,
) -> Option<(usize, f64)> {
    let ids: Vec<usize> = match universe {
        Universe::Edges => graph.edges(),
        Universe::Vertices => graph.nodes().to_vec(),
    };
    if ids.is_empty() {
        return None;
    }

    let degrees: Vec<usize> = ids.iter().map(|&id| item_degree(graph, universe, id)).collect();
    let btwns_ranks = dense_ranks(&betweenness_scores(graph, universe, &ids, kind), Some(&degrees));

    if !with_bridging {
        let scores: Vec<f64> = btwns_ranks.iter().map(|&r| r as f64).collect();
        let best = tiebreak(&scores, &degrees)?;
        return Some((ids[best], scores[best]));
    }

    let bridge_ranks = dense_ranks(&bridging_scores(graph, universe, &ids, 1), Some(&degrees));
    let mut combined: Vec<f64> = btwns_ranks
        .iter()
        .zip(&bridge_ranks)
        .map(|(&b, &c)| (b * c) as f64)
        .collect();
    let mut candidates: Vec<usize> = (0..ids.len()).collect();

    if config.depth > 1 {
        // Keep the top share by combined score, then back to graph order
        candidates.sort_by(|&a, &b| combined[b].total_cmp(&combined[a]));
        let keep = ((ids.len() as f64 * config.top_percentile) as usize + 1).min(ids.len());
        candidates.truncate(keep);
        candidates.sort_unstable();

        let subset: Vec<usize> = candidates.iter().map(|&i| ids[i]).collect();
        let subset_degrees: Vec<usize> = candidates.iter().map(|&i| degrees[i]).collect();
        let mut accumulated: Vec<usize> = candidates.iter().map(|&i| bridge_ranks[i]).collect();

        for depth in 2..=config.depth {
            let deeper = bridging_scores(graph, universe, &subset, depth);
            for (acc, rank) in accumulated.iter_mut().zip(dense_ranks(&deeper, Some(&subset_degrees))) {
                *acc += rank;
            }
        }

        for (pos, &i) in candidates.iter().enumerate() {
            combined[i] = (btwns_ranks[i] * accumulated[pos]) as f64;
        }
    }

    let scores: Vec<f64> = candidates.iter().map(|&i| combined[i]).collect();
    let candidate_degrees: Vec<usize> = candidates.iter().map(|&i| degrees[i]).collect();
    let best = tiebreak(&scores, &candidate_degrees)?;

    log::trace!(
        "Selected {} of {} candidates with score {}",
        ids[candidates[best]],
        candidates.len(),
        scores[best]
    );

    Some((ids[candidates[best]], scores[best]))
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

    fn config(strategy: Strategy) -> Config {
        Config::new(strategy, 0.5, 1, 0.25)
    }

    #[test]
    fn test_parse_names_and_aliases() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("vertex-c".parse::<Strategy>().unwrap(), Strategy::VertexBridging);
        assert_eq!("EDGE-B".parse::<Strategy>().unwrap(), Strategy::EdgeBetweenness);
        assert_eq!(
            "girvan-newman".parse::<Strategy>(),
            Err(BridgeCutError::UnknownStrategy("girvan-newman".to_string()))
        );
    }

    #[test]
    fn test_edge_betweenness_cuts_the_bridge() {
        let mut graph = bowtie();
        let split = Strategy::EdgeBetweenness
            .split(&mut graph, &config(Strategy::EdgeBetweenness))
            .unwrap();

        assert_eq!(split.item, Item::Edge("C".into(), "D".into()));
        assert_eq!(split.item.to_string(), "C <-> D");
        // Betweenness values 1, 4 and 9 rank densely; the bridge holds rank 3
        assert_eq!(split.score, 3.0);
        let c = graph.lookup("C").unwrap();
        let d = graph.lookup("D").unwrap();
        assert_eq!(split.cut, Cut::Separated(vec![c, d]));
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_vertex_betweenness_detaches_first_of_tied_bridges() {
        let mut graph = bowtie();
        let split = Strategy::VertexBetweenness
            .split(&mut graph, &config(Strategy::VertexBetweenness))
            .unwrap();

        assert_eq!(split.item, Item::Vertex("C".into()));
        let ids = |keys: &[&str]| keys.iter().map(|k| graph.lookup(k).unwrap()).collect::<Vec<_>>();
        assert_eq!(split.cut, Cut::Separated(ids(&["C", "A", "B", "D"])));
        assert!(graph.contains("C"));
        assert_eq!(graph.degree(graph.lookup("C").unwrap()), 0);
    }

    #[test]
    fn test_bridging_strategies_pick_bridge_elements() {
        let mut graph = bowtie();
        let split = Strategy::EdgeBridging
            .split(&mut graph, &config(Strategy::EdgeBridging))
            .unwrap();
        assert_eq!(split.item, Item::Edge("C".into(), "D".into()));

        let mut graph = bowtie();
        let split = Strategy::VertexBridging
            .split(&mut graph, &config(Strategy::VertexBridging))
            .unwrap();
        assert!(matches!(split.item, Item::Vertex(ref k) if k == "C" || k == "D"));
    }

    // Triangle A-B-C with a pendant D on A, a tail C-F and a detour A-E-G-B
    const DETOUR: [(&str, &str); 8] = [
        ("A", "B"),
        ("A", "C"),
        ("A", "D"),
        ("A", "E"),
        ("B", "C"),
        ("B", "G"),
        ("C", "F"),
        ("E", "G"),
    ];

    // Hub A with spokes B..E; B-D closes a triangle, D-F-E loops back to the hub
    const HUB_LOOP: [(&str, &str); 7] = [
        ("A", "B"),
        ("A", "C"),
        ("A", "D"),
        ("A", "E"),
        ("B", "D"),
        ("D", "F"),
        ("E", "F"),
    ];

    fn split_with(pairs: &[(&str, &str)], strategy: Strategy, depth: usize, top_percentile: f64) -> Split {
        let mut graph = build_graph(pairs.iter().copied()).unwrap();
        let config = Config::new(strategy, 0.5, depth, top_percentile);
        strategy.split(&mut graph, &config).unwrap()
    }

    #[test]
    fn test_vertex_depth_escalation_changes_the_cut() {
        // Depth 1: A, B and E tie at 12 (6x2, 4x3, 3x4); A has the highest degree
        let split = split_with(&DETOUR, Strategy::VertexBridging, 1, 0.25);
        assert_eq!(split.item, Item::Vertex("A".into()));
        assert_eq!(split.score, 12.0);

        // floor(7 x 0.25) + 1 keeps A and B only. Both score 0 at depth 2, so degree
        // ranks A below B: A = 6 x (2 + 1), B = 4 x (3 + 2)
        let split = split_with(&DETOUR, Strategy::VertexBridging, 2, 0.25);
        assert_eq!(split.item, Item::Vertex("B".into()));
        assert_eq!(split.score, 20.0);

        // Depth 3 adds a third bridging rank on top of the same subset
        let split = split_with(&DETOUR, Strategy::VertexBridging, 3, 0.25);
        assert_eq!(split.item, Item::Vertex("B".into()));
        assert_eq!(split.score, 28.0);

        // Keeping every candidate lets E, dropped by the truncation above, win
        let split = split_with(&DETOUR, Strategy::VertexBridging, 2, 1.0);
        assert_eq!(split.item, Item::Vertex("E".into()));
        assert_eq!(split.score, 21.0);
    }

    #[test]
    fn test_edge_depth_escalation_changes_the_cut() {
        // Depth 1: A-E and D-F tie at 30; A-E has the larger endpoint degree
        let split = split_with(&HUB_LOOP, Strategy::EdgeBridging, 1, 0.25);
        assert_eq!(split.item, Item::Edge("A".into(), "E".into()));
        assert_eq!(split.score, 30.0);

        // The two kept edges re-rank at depth 2, where only D-F still bridges:
        // A-E = 6 x (5 + 1), D-F = 5 x (6 + 2)
        let split = split_with(&HUB_LOOP, Strategy::EdgeBridging, 2, 0.25);
        assert_eq!(split.item, Item::Edge("D".into(), "F".into()));
        assert_eq!(split.score, 40.0);

        let split = split_with(&HUB_LOOP, Strategy::EdgeBridging, 3, 0.25);
        assert_eq!(split.item, Item::Edge("D".into(), "F".into()));
        assert_eq!(split.score, 50.0);

        // floor(7 x 0.5) + 1 = 4 candidates brings A-C back into play
        let split = split_with(&HUB_LOOP, Strategy::EdgeBridging, 2, 0.5);
        assert_eq!(split.item, Item::Edge("A".into(), "C".into()));
        assert_eq!(split.score, 56.0);

        let split = split_with(&HUB_LOOP, Strategy::EdgeBridging, 2, 1.0);
        assert_eq!(split.item, Item::Edge("A".into(), "C".into()));
        assert_eq!(split.score, 70.0);
    }

    #[test]
    fn test_exhausted_when_nothing_to_cut() {
        let mut graph = build_graph([("A", "B")]).unwrap();
        let a = graph.lookup("A").unwrap();
        graph.detach_node(a);

        let split = Strategy::EdgeBetweenness
            .split(&mut graph, &config(Strategy::EdgeBetweenness))
            .unwrap();
        assert_eq!(split.cut, Cut::Exhausted(a));
        assert_eq!(split.item, Item::Vertex("A".into()));

        let split = Strategy::VertexBetweenness
            .split(&mut graph, &config(Strategy::VertexBetweenness))
            .unwrap();
        assert!(matches!(split.cut, Cut::Exhausted(_)));
    }

    #[test]
    fn test_empty_graph_has_no_split() {
        let mut graph = Graph::new();
        assert!(Strategy::VertexBridging
            .split(&mut graph, &config(Strategy::VertexBridging))
            .is_none());
    }
}
