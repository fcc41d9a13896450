//! Arena-backed undirected graph

use std::collections::HashMap;
use std::fmt;

/// Stable index of a node inside its owning graph
pub type NodeId = usize;

/// Stable index of an edge inside its owning graph
pub type EdgeId = usize;

/// A vertex: an immutable key plus the ids of its incident edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: String,
    edges: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(key: String) -> Self {
        Self {
            key,
            edges: Vec::new(),
        }
    }

    /// The node's key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Incident edges, in the order they were attached
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of incident edges
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// An undirected edge between two distinct nodes, low id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    pub(crate) fn new(a: NodeId, b: NodeId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Both endpoints, low id first
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint at all
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }

    /// Whether `node` is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        node == self.low || node == self.high
    }
}

/// Mutable simple undirected graph.
///
/// Nodes and edges live in arenas owned by the graph and refer to each other by
/// index. Node ids are handed out in key order when the graph is built, so walking
/// live ids in ascending order is the same as walking keys in sort order; edge ids
/// follow sorted `(low, high)` endpoint order. Removed slots are left empty and ids
/// are never reused.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    /// Live node ids in ascending (key) order
    order: Vec<NodeId>,
    /// Key to id lookup for live nodes
    index: HashMap<String, NodeId>,
    live_edges: usize,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from keys already in sort order and deduplicated edge pairs
    /// sorted by `(low, high)`. Ids are positions in `keys`.
    pub(crate) fn from_sorted_parts(keys: Vec<String>, pairs: &[(NodeId, NodeId)]) -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(keys.len()),
            edges: Vec::with_capacity(pairs.len()),
            order: Vec::with_capacity(keys.len()),
            index: HashMap::with_capacity(keys.len()),
            live_edges: 0,
        };

        // Ids are positions in the sorted key list
        for (id, key) in keys.into_iter().enumerate() {
            graph.index.insert(key.clone(), id);
            graph.nodes.push(Some(Node::new(key)));
            graph.order.push(id);
        }

        // Register each edge with both endpoints
        for &(a, b) in pairs {
            let edge_id = graph.edges.len();
            graph.edges.push(Some(Edge::new(a, b)));
            if let Some(node) = graph.nodes[a].as_mut() {
                node.edges.push(edge_id);
            }
            if let Some(node) = graph.nodes[b].as_mut() {
                node.edges.push(edge_id);
            }
            graph.live_edges += 1;
        }

        graph
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Number of live edges
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// True when no nodes are left
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live node ids in key order
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    /// Live edge ids in ascending id order
    pub fn edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(id, edge)| edge.map(|_| id))
            .collect()
    }

    /// Look up a live node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    /// Look up a live edge
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id).copied().flatten()
    }

    /// Key of a live node
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::key)
    }

    /// Id of the live node with the given key
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Whether a live node carries this key
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Incident edge count; zero for ids that are not live
    pub fn degree(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, Node::degree)
    }

    /// Sum of the endpoint degrees of an edge
    pub fn edge_degree(&self, id: EdgeId) -> usize {
        self.edge(id).map_or(0, |edge| {
            let (a, b) = edge.endpoints();
            self.degree(a) + self.degree(b)
        })
    }

    /// Directly adjacent nodes, in incident-edge order
    pub fn adjacent(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.edges.iter())
            .filter_map(move |&edge_id| self.edge(edge_id).and_then(|edge| edge.other(id)))
    }

    /// The edge joining `a` and `b`, if any
    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        let (from, to) = if self.degree(a) <= self.degree(b) { (a, b) } else { (b, a) };
        self.node(from)?
            .edges
            .iter()
            .copied()
            .find(|&edge_id| self.edge(edge_id).is_some_and(|edge| edge.touches(to)))
    }

    /// Whether `a` and `b` share an edge
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Detach an edge from both endpoints and drop it. Returns its endpoints.
    pub fn destroy_edge(&mut self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        // Leave the slot empty so ids stay stable
        let edge = self.edges.get_mut(id)?.take()?;
        let (a, b) = edge.endpoints();
        for endpoint in [a, b] {
            if let Some(node) = self.nodes.get_mut(endpoint).and_then(Option::as_mut) {
                node.edges.retain(|&e| e != id);
            }
        }
        self.live_edges -= 1;
        Some((a, b))
    }

    /// Destroy every edge incident to `id`, leaving the node live but isolated.
    /// Returns the former neighbors in key order.
    pub fn detach_node(&mut self, id: NodeId) -> Vec<NodeId> {
        // Copy of the incident list; destroying edges edits the original
        let incident = match self.node(id) {
            Some(node) => node.edges.clone(),
            None => return Vec::new(),
        };

        let mut neighbors: Vec<NodeId> = incident
            .into_iter()
            .filter_map(|edge_id| self.destroy_edge(edge_id))
            .map(|(a, b)| if a == id { b } else { a })
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Detach a node and drop it from the graph. Returns its former neighbors.
    pub fn destroy_node(&mut self, id: NodeId) -> Vec<NodeId> {
        let neighbors = self.detach_node(id);
        if let Some(node) = self.nodes.get_mut(id).and_then(Option::take) {
            self.index.remove(&node.key);
            self.order.retain(|&n| n != id);
        }
        neighbors
    }

    /// Delete every node of `subgraph` (matched by key) together with its incident edges.
    /// Keys that are not present here are ignored.
    pub fn remove(&mut self, subgraph: &Graph) {
        for key in subgraph.keys() {
            if let Some(id) = self.lookup(key) {
                self.destroy_node(id);
            }
        }
    }

    /// Live keys in sort order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().filter_map(move |&id| self.key(id))
    }

    /// Keys of both endpoints of an edge
    pub fn edge_keys(&self, id: EdgeId) -> Option<(&str, &str)> {
        let (a, b) = self.edge(id)?.endpoints();
        Some((self.key(a)?, self.key(b)?))
    }

    /// Induced subgraph over the given live ids, with fresh ids assigned in key order
    pub fn subgraph(&self, ids: &[NodeId]) -> Graph {
        let mut members: Vec<NodeId> = ids.iter().copied().filter(|&id| self.node(id).is_some()).collect();
        members.sort_unstable();
        members.dedup();

        // Old id -> new id, following key order
        let mut remap = HashMap::with_capacity(members.len());
        let mut keys = Vec::with_capacity(members.len());
        for (new_id, &old_id) in members.iter().enumerate() {
            remap.insert(old_id, new_id);
            if let Some(key) = self.key(old_id) {
                keys.push(key.to_string());
            }
        }

        // Keep only edges with both endpoints inside
        let mut pairs: Vec<(NodeId, NodeId)> = self
            .edges
            .iter()
            .flatten()
            .filter_map(|edge| {
                let (a, b) = edge.endpoints();
                Some((*remap.get(&a)?, *remap.get(&b)?))
            })
            .collect();
        pairs.sort_unstable();

        Graph::from_sorted_parts(keys, &pairs)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    fn diamond() -> Graph {
        build_graph([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("b", "c")]).unwrap()
    }

    #[test]
    fn test_ids_follow_key_order() {
        let graph = build_graph([("z", "m"), ("m", "a")]).unwrap();
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
        assert_eq!(graph.lookup("a"), Some(0));
        assert_eq!(graph.lookup("z"), Some(2));
    }

    #[test]
    fn test_destroy_edge_detaches_both_endpoints() {
        let mut graph = diamond();
        let b = graph.lookup("b").unwrap();
        let c = graph.lookup("c").unwrap();
        let edge = graph.find_edge(b, c).unwrap();

        assert_eq!(graph.destroy_edge(edge), Some((b, c)));
        assert_eq!(graph.edge_count(), 4);
        assert!(!graph.has_edge(b, c));
        assert_eq!(graph.degree(b), 2);
        assert_eq!(graph.degree(c), 2);
        assert_eq!(graph.destroy_edge(edge), None);
    }

    #[test]
    fn test_detach_node_keeps_it_live() {
        let mut graph = diamond();
        let b = graph.lookup("b").unwrap();
        let neighbors = graph.detach_node(b);

        let keys: Vec<&str> = neighbors.iter().filter_map(|&n| graph.key(n)).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert!(graph.contains("b"));
        assert_eq!(graph.degree(b), 0);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_destroy_node_drops_lookup() {
        let mut graph = diamond();
        let a = graph.lookup("a").unwrap();
        graph.destroy_node(a);

        assert_eq!(graph.node_count(), 3);
        assert!(!graph.contains("a"));
        assert_eq!(graph.node(a), None);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_remove_subgraph_by_key() {
        let mut graph = diamond();
        let other = build_graph([("a", "b"), ("x", "y")]).unwrap();
        graph.remove(&other);

        assert_eq!(graph.keys().collect::<Vec<_>>(), vec!["c", "d"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_subgraph_reassigns_ids() {
        let graph = diamond();
        let ids: Vec<NodeId> = ["b", "c", "d"].iter().filter_map(|k| graph.lookup(k)).collect();
        let sub = graph.subgraph(&ids);

        assert_eq!(sub.to_string(), "b, c, d");
        assert_eq!(sub.lookup("b"), Some(0));
        assert_eq!(sub.edge_count(), 3);
    }
}
