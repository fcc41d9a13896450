//! Cluster analysis module

pub mod detection;
pub mod metrics;
pub mod strategy;

use crate::config::Config;
use crate::error::Result;
use crate::graph::Graph;
use serde::Serialize;

pub use detection::BridgeCut;
pub use strategy::{Cut, Item, Split, Strategy};

/// Summary of an accepted cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Position in acceptance order
    pub id: u32,

    /// Member keys, in key order
    pub members: Vec<String>,

    /// Size of the cluster
    pub size: usize,

    /// Edges between members
    pub edge_count: usize,

    /// Density: actual edges / potential edges (infinite for singletons)
    pub density: f64,
}

impl Cluster {
    /// Summarize an accepted component
    pub fn from_graph(id: u32, graph: &Graph) -> Self {
        Self {
            id,
            members: graph.keys().map(str::to_string).collect(),
            size: graph.node_count(),
            edge_count: graph.edge_count(),
            density: graph.density(),
        }
    }
}

/// One SPLIT + EXPAND round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// The edge or vertex that was cut
    pub item: Item,

    /// Ranking score that selected it
    pub score: f64,

    /// Nodes that left the live graph this round
    pub removed: usize,

    /// Clustering coefficient of what is still live afterwards
    pub cluster_coefficient: f64,
}

/// Raw output of a clustering run
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    /// Step records in execution order
    pub steps: Vec<StepRecord>,

    /// Accepted components, in acceptance order
    pub clusters: Vec<Graph>,
}

impl Clustering {
    /// Serializable summaries of the accepted clusters
    pub fn summaries(&self) -> Vec<Cluster> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(id, graph)| Cluster::from_graph(id as u32, graph))
            .collect()
    }
}

/// Everything a run produces, ready for storage
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Parameters of the run
    pub config: Config,

    /// Nodes in the input graph
    pub node_count: usize,

    /// Edges in the input graph
    pub edge_count: usize,

    /// Removal steps
    pub steps: Vec<StepRecord>,

    /// Accepted clusters
    pub clusters: Vec<Cluster>,

    /// Davies-Bouldin style index (lower is better, infinite when undefined)
    pub davies_bouldin: f64,

    /// Mean silhouette coefficient (higher is better)
    pub silhouette: f64,
}

/// Cluster `graph` and score the result against it
pub fn analyze(graph: &Graph, config: &Config) -> Result<Report> {
    let clustering = BridgeCut::new(config.clone())?.run(graph);

    let davies_bouldin = metrics::davies_bouldin(graph, &clustering.clusters);
    let silhouette = metrics::silhouette(graph, &clustering.clusters);

    log::info!(
        "Validity: Davies-Bouldin index {:.4}, silhouette {:.4}",
        davies_bouldin,
        silhouette
    );

    Ok(Report {
        config: config.clone(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        clusters: clustering.summaries(),
        steps: clustering.steps,
        davies_bouldin,
        silhouette,
    })
}
