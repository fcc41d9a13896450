//! Graph representation and algorithms module

pub mod model;
pub mod builder;
pub mod algorithms;
pub mod paths;

pub use builder::{build_graph, GraphBuilder};
pub use model::{Edge, EdgeId, Graph, Node, NodeId};
pub use paths::{PathSet, PathSets};
