//! Scoring functions used to pick the next bridge to cut

pub mod betweenness;
pub mod bridging;
pub mod rank;

pub use betweenness::{
    ego_edge_betweenness, ego_node_betweenness, edge_betweenness, node_betweenness,
    BetweennessKind,
};
pub use bridging::{edge_bridging, node_bridging};
pub use rank::{dense_ranks, rank, rank_with_tiebreak, tiebreak};
