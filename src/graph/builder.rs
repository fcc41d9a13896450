//! Graph construction module

use crate::error::{BridgeCutError, Result};
use crate::graph::model::{Graph, NodeId};
use std::collections::{BTreeSet, HashMap};

/// Builder for incrementally constructing a [`Graph`] from edge records.
///
/// Every record is validated as it is added; a builder that returned an error
/// should be dropped, so no partially built graph ever escapes.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from string keys to provisional indices
    id_to_index: HashMap<String, usize>,

    /// Keys in first-seen order
    node_ids: Vec<String>,

    /// Deduplicated provisional edges, low index first
    pairs: BTreeSet<(usize, usize)>,

    /// Number of records consumed so far
    records: usize,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            pairs: BTreeSet::new(),
            records: 0,
        }
    }

    /// Get or create a provisional index for the given key
    fn get_or_create_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len();
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        idx
    }

    /// Add an undirected edge. Repeats in either orientation collapse into one edge.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> Result<()> {
        let record = self.records;
        self.records += 1;

        // Keys are opaque; only the empty key is refused
        if src_id.is_empty() || dst_id.is_empty() {
            return Err(BridgeCutError::malformed(record, "empty node key"));
        }
        if src_id == dst_id {
            return Err(BridgeCutError::malformed(
                record,
                format!("self-loop on node '{}'", src_id),
            ));
        }

        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.pairs.insert((src_idx.min(dst_idx), src_idx.max(dst_idx)));

        Ok(())
    }

    /// Build the graph, assigning node ids in key order
    pub fn build(self) -> Graph {
        // Sort keys so ids, iteration and tie-breaks are identical across runs
        let mut by_key: Vec<(String, usize)> = self
            .node_ids
            .into_iter()
            .enumerate()
            .map(|(idx, key)| (key, idx))
            .collect();
        by_key.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut provisional_to_final = vec![0; by_key.len()];
        for (final_id, (_, provisional)) in by_key.iter().enumerate() {
            provisional_to_final[*provisional] = final_id;
        }

        let mut pairs: Vec<(NodeId, NodeId)> = self
            .pairs
            .into_iter()
            .map(|(a, b)| {
                let (a, b) = (provisional_to_final[a], provisional_to_final[b]);
                (a.min(b), a.max(b))
            })
            .collect();
        pairs.sort_unstable();

        let keys = by_key.into_iter().map(|(key, _)| key).collect();
        let graph = Graph::from_sorted_parts(keys, &pairs);

        log::debug!(
            "Built graph with {} nodes and {} edges from {} records",
            graph.node_count(),
            graph.edge_count(),
            self.records
        );

        graph
    }
}

/// Build a graph from `(key, key)` pairs in one call
pub fn build_graph<I, A, B>(pairs: I) -> Result<Graph>
where
    I: IntoIterator<Item = (A, B)>,
    A: AsRef<str>,
    B: AsRef<str>,
{
    let pairs = pairs.into_iter();
    let mut builder = GraphBuilder::with_capacity(pairs.size_hint().0);
    for (src, dst) in pairs {
        builder.add_edge(src.as_ref(), dst.as_ref())?;
    }
    Ok(builder.build())
}
