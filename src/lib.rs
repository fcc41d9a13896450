//! BridgeCut: bridge-removal clustering of undirected graphs

pub mod config;
pub mod error;
pub mod graph;
pub mod scoring;
pub mod cluster;
pub mod data;
pub mod storage;
pub mod viz;

pub use cluster::{analyze, BridgeCut, Cluster, Clustering, Item, Report, StepRecord, Strategy};
pub use config::Config;
pub use error::{BridgeCutError, Result};
pub use graph::{build_graph, Graph, GraphBuilder, NodeId, PathSets};
pub use scoring::BetweennessKind;
