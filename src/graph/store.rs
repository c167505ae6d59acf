//! In-memory multigraph storage
//!
//! The store owns the canonical edge records, the registration order of
//! edges, and the adjacency index. It is the only writer of the index: each
//! edge insertion or removal calls `connect` or `disconnect` exactly once,
//! after validating both endpoints.

use super::adjacency::AdjacencyIndex;
use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::linked::{self, LinkedKeys};
use super::node::NodeEntry;
use super::options::GraphOptions;
use super::query::{EdgeQuery, NeighborQuery, Traversal};
use super::types::{EdgeKey, GraphType, NodeKey};
use tracing::debug;

/// In-memory typed multigraph
///
/// - edges: EdgeKey -> Edge (canonical records, in registration order)
/// - index: NodeKey -> NodeEntry (in / out / undirected adjacency)
///
/// Not synchronized. Iterators returned by the query engines borrow the
/// store, so the graph cannot be mutated while one is alive.
#[derive(Debug, Clone)]
pub struct GraphStore {
    options: GraphOptions,

    /// Edge storage
    edges: LinkedKeys<EdgeKey, Edge>,

    /// Per-node adjacency, nodes in registration order
    index: AdjacencyIndex,

    /// Counter for generated edge keys
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty mixed, simple graph
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    pub fn with_options(options: GraphOptions) -> Self {
        GraphStore {
            options,
            edges: LinkedKeys::new(),
            index: AdjacencyIndex::new(),
            next_edge_id: 0,
        }
    }

    /// The graph discipline
    pub fn graph_type(&self) -> GraphType {
        self.options.graph_type
    }

    pub fn is_multi(&self) -> bool {
        self.options.multi
    }

    // ----------------------------------------------------------------------
    // Nodes
    // ----------------------------------------------------------------------

    /// Register a node
    pub fn add_node(&mut self, key: impl Into<NodeKey>) -> GraphResult<NodeKey> {
        let key = key.into();
        if !self.index.register(key.clone()) {
            return Err(GraphError::NodeAlreadyExists {
                operation: "add_node",
                key,
            });
        }
        debug!("Added node {}", key);
        Ok(key)
    }

    /// Register several nodes, stopping at the first one already present
    pub fn add_nodes_from<I, K>(&mut self, keys: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        for key in keys {
            self.add_node(key)?;
        }
        Ok(())
    }

    /// Register a node unless it already exists. Returns whether it was added.
    pub fn merge_node(&mut self, key: impl Into<NodeKey>) -> bool {
        let key = key.into();
        let added = self.index.register(key.clone());
        if added {
            debug!("Added node {}", key);
        }
        added
    }

    /// Remove a node together with every edge incident to it
    pub fn drop_node(&mut self, key: impl Into<NodeKey>) -> GraphResult<()> {
        let key = key.into();
        if self.entry(&key).is_none() {
            return Err(GraphError::not_found("drop_node", &key));
        }
        let incident = self.edges(Traversal::Mixed).by_node(&key)?;

        for edge_key in &incident {
            self.remove_edge_record(edge_key);
        }
        self.index.unregister(&key);

        debug!("Dropped node {} ({} incident edges)", key, incident.len());
        Ok(())
    }

    pub fn has_node(&self, key: impl Into<NodeKey>) -> bool {
        self.index.contains(&key.into())
    }

    /// Node keys, in registration order
    pub fn nodes(&self) -> Vec<NodeKey> {
        self.index.keys().cloned().collect()
    }

    /// Lazy view of the node keys, in registration order
    pub fn nodes_iter(&self) -> impl Iterator<Item = &NodeKey> + '_ {
        self.index.keys()
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    // ----------------------------------------------------------------------
    // Edges
    // ----------------------------------------------------------------------

    /// Add an edge whose kind follows the discipline: undirected in an
    /// undirected graph, directed otherwise.
    pub fn add_edge_with_key(
        &mut self,
        key: impl Into<EdgeKey>,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        let directed = self.default_directedness();
        self.insert_edge(
            "add_edge_with_key",
            key.into(),
            source.into(),
            target.into(),
            directed,
        )
    }

    pub fn add_directed_edge_with_key(
        &mut self,
        key: impl Into<EdgeKey>,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        self.insert_edge(
            "add_directed_edge_with_key",
            key.into(),
            source.into(),
            target.into(),
            true,
        )
    }

    pub fn add_undirected_edge_with_key(
        &mut self,
        key: impl Into<EdgeKey>,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        self.insert_edge(
            "add_undirected_edge_with_key",
            key.into(),
            source.into(),
            target.into(),
            false,
        )
    }

    /// Add an edge under a generated key
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        let directed = self.default_directedness();
        let key = self.generate_edge_key();
        self.insert_edge("add_edge", key, source.into(), target.into(), directed)
    }

    pub fn add_directed_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        let key = self.generate_edge_key();
        self.insert_edge("add_directed_edge", key, source.into(), target.into(), true)
    }

    pub fn add_undirected_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        let key = self.generate_edge_key();
        self.insert_edge("add_undirected_edge", key, source.into(), target.into(), false)
    }

    /// Add an edge, registering missing endpoints on the way.
    ///
    /// Re-adding an existing key with the same endpoints and kind is a
    /// no-op; re-using it for different endpoints is a usage error.
    pub fn merge_edge_with_key(
        &mut self,
        key: impl Into<EdgeKey>,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeKey> {
        const OPERATION: &str = "merge_edge_with_key";

        let key = key.into();
        let source = source.into();
        let target = target.into();
        let directed = self.default_directedness();

        if let Some(existing) = self.edges.get(&key) {
            if existing.directed == directed && existing.joins(&source, &target) {
                return Ok(key);
            }
            return Err(GraphError::usage(
                OPERATION,
                format!(
                    "the \"{}\" edge already exists with different extremities ({}, {})",
                    key, existing.source, existing.target
                ),
            ));
        }

        self.merge_node(source.clone());
        self.merge_node(target.clone());
        self.insert_edge(OPERATION, key, source, target, directed)
    }

    /// Remove an edge, returning its record
    pub fn drop_edge(&mut self, key: impl Into<EdgeKey>) -> GraphResult<Edge> {
        let key = key.into();
        self.remove_edge_record(&key)
            .ok_or(GraphError::EdgeNotFound {
                operation: "drop_edge",
                key,
            })
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.edges.clear();
        self.index.clear();
        debug!("Cleared graph");
    }

    /// Remove every edge, keeping the nodes
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.index.clear_edges();
        debug!("Cleared graph edges");
    }

    pub fn has_edge(&self, key: impl Into<EdgeKey>) -> bool {
        self.edges.contains_key(&key.into())
    }

    pub fn get_edge(&self, key: impl Into<EdgeKey>) -> Option<&Edge> {
        self.edges.get(&key.into())
    }

    /// `(source, target, directed)` of an edge
    pub fn edge_endpoints(&self, key: impl Into<EdgeKey>) -> Option<(&NodeKey, &NodeKey, bool)> {
        self.get_edge(key)
            .map(|edge| (&edge.source, &edge.target, edge.directed))
    }

    pub fn source(&self, key: impl Into<EdgeKey>) -> GraphResult<&NodeKey> {
        self.lookup_edge("source", key.into()).map(|edge| &edge.source)
    }

    pub fn target(&self, key: impl Into<EdgeKey>) -> GraphResult<&NodeKey> {
        self.lookup_edge("target", key.into()).map(|edge| &edge.target)
    }

    pub fn extremities(&self, key: impl Into<EdgeKey>) -> GraphResult<(&NodeKey, &NodeKey)> {
        self.lookup_edge("extremities", key.into())
            .map(|edge| (&edge.source, &edge.target))
    }

    pub fn is_directed(&self, key: impl Into<EdgeKey>) -> GraphResult<bool> {
        self.lookup_edge("is_directed", key.into())
            .map(|edge| edge.directed)
    }

    pub fn is_self_loop(&self, key: impl Into<EdgeKey>) -> GraphResult<bool> {
        self.lookup_edge("is_self_loop", key.into())
            .map(Edge::is_self_loop)
    }

    /// Every edge record, in registration order
    pub fn edge_records(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().map(|(_, edge)| edge)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    /// Neighbor queries for one traversal variant
    pub fn neighbors(&self, traversal: Traversal) -> NeighborQuery<'_> {
        NeighborQuery::new(self, traversal)
    }

    /// Edge queries for one traversal variant
    pub fn edges(&self, traversal: Traversal) -> EdgeQuery<'_> {
        EdgeQuery::new(self, traversal)
    }

    /// Read-only view of the adjacency index
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.index
    }

    pub(crate) fn entry(&self, node: &NodeKey) -> Option<&NodeEntry> {
        self.index.get(node)
    }

    pub(crate) fn edge_walk(&self) -> linked::Iter<'_, EdgeKey, Edge> {
        self.edges.iter()
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn default_directedness(&self) -> bool {
        self.options.graph_type != GraphType::Undirected
    }

    fn generate_edge_key(&mut self) -> EdgeKey {
        loop {
            let key = EdgeKey::from(format!("e{}", self.next_edge_id));
            self.next_edge_id += 1;
            if !self.edges.contains_key(&key) {
                return key;
            }
        }
    }

    fn lookup_edge(&self, operation: &'static str, key: EdgeKey) -> GraphResult<&Edge> {
        match self.edges.get(&key) {
            Some(edge) => Ok(edge),
            None => Err(GraphError::EdgeNotFound { operation, key }),
        }
    }

    fn insert_edge(
        &mut self,
        operation: &'static str,
        key: EdgeKey,
        source: NodeKey,
        target: NodeKey,
        directed: bool,
    ) -> GraphResult<EdgeKey> {
        let kind = if directed { "directed" } else { "undirected" };

        if !self.options.graph_type.accepts(directed) {
            return Err(GraphError::usage(
                operation,
                format!(
                    "cannot add {} edge \"{}\" to a {} graph",
                    kind, key, self.options.graph_type
                ),
            ));
        }
        if self.edges.contains_key(&key) {
            return Err(GraphError::EdgeAlreadyExists { operation, key });
        }

        let source_entry = self
            .index
            .get(&source)
            .ok_or_else(|| GraphError::not_found(operation, &source))?;
        if !self.index.contains(&target) {
            return Err(GraphError::not_found(operation, &target));
        }

        if source == target && !self.options.allow_self_loops {
            return Err(GraphError::usage(
                operation,
                format!(
                    "source & target are the same (\"{}\") but the graph does not allow self-loops",
                    source
                ),
            ));
        }

        if !self.is_multi() {
            let parallel = if directed {
                source_entry.outbound.has_neighbor(&target)
            } else {
                source_entry.undirected.has_neighbor(&target)
            };
            if parallel {
                return Err(GraphError::usage(
                    operation,
                    format!(
                        "an {} edge already joins \"{}\" and \"{}\" in this simple graph",
                        kind, source, target
                    ),
                ));
            }
        }

        let edge = Edge::new(key.clone(), source, target, directed);
        self.index.connect(&edge);
        debug!(
            "Added {} edge {} ({} -> {})",
            kind, key, edge.source, edge.target
        );
        self.edges.push_back(key.clone(), edge);

        Ok(key)
    }

    fn remove_edge_record(&mut self, key: &EdgeKey) -> Option<Edge> {
        let edge = self.edges.remove(key)?;
        self.index.disconnect(&edge);
        debug!("Dropped edge {}", key);
        Some(edge)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> GraphStore {
        GraphStore::with_options(GraphOptions::default().with_multi(true))
    }

    #[test]
    fn test_add_and_has_node() {
        let mut store = GraphStore::new();
        store.add_node("John").unwrap();

        assert_eq!(store.node_count(), 1);
        assert!(store.has_node("John"));
        assert!(!store.has_node("Jack"));
    }

    #[test]
    fn test_add_duplicate_node() {
        let mut store = GraphStore::new();
        store.add_node("John").unwrap();

        let result = store.add_node("John");
        assert_eq!(
            result,
            Err(GraphError::NodeAlreadyExists {
                operation: "add_node",
                key: NodeKey::new("John"),
            })
        );
        assert!(!store.merge_node("John"));
        assert!(store.merge_node("Jack"));
    }

    #[test]
    fn test_nodes_in_registration_order() {
        let mut store = GraphStore::new();
        store.add_nodes_from(["one", "two", "three"]).unwrap();

        assert_eq!(store.nodes(), vec!["one", "two", "three"]);
        let mut iter = store.nodes_iter();
        assert_eq!(iter.next().unwrap(), "one");
        assert_eq!(iter.next().unwrap(), "two");
        assert_eq!(iter.next().unwrap(), "three");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_create_and_get_edge() {
        let mut store = GraphStore::new();
        store.add_nodes_from(["A", "B"]).unwrap();
        let key = store.add_edge_with_key("A->B", "A", "B").unwrap();

        assert_eq!(store.edge_count(), 1);
        let edge = store.get_edge(&key).unwrap();
        assert_eq!(edge.source, "A");
        assert_eq!(edge.target, "B");
        assert!(edge.directed);
        assert_eq!(
            store.edge_endpoints("A->B"),
            Some((&NodeKey::new("A"), &NodeKey::new("B"), true))
        );
        assert_eq!(store.source("A->B").unwrap(), "A");
        assert_eq!(store.target("A->B").unwrap(), "B");
    }

    #[test]
    fn test_edge_validation() {
        let mut store = GraphStore::new();
        store.add_node("A").unwrap();

        let result = store.add_edge_with_key("e", "Z", "A");
        assert_eq!(
            result,
            Err(GraphError::NotFound {
                operation: "add_edge_with_key",
                key: NodeKey::new("Z"),
            })
        );

        let result = store.add_edge_with_key("e", "A", "Z");
        assert!(matches!(result, Err(GraphError::NotFound { .. })));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_edge_key() {
        let mut store = multi();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_edge_with_key("e", "A", "B").unwrap();

        let result = store.add_edge_with_key("e", "B", "A");
        assert!(matches!(result, Err(GraphError::EdgeAlreadyExists { .. })));
    }

    #[test]
    fn test_discipline_enforced_on_insert() {
        let mut directed = GraphStore::with_options(GraphOptions::directed());
        directed.add_nodes_from(["A", "B"]).unwrap();
        let result = directed.add_undirected_edge_with_key("e", "A", "B");
        assert!(matches!(result, Err(GraphError::Usage { .. })));

        let mut undirected = GraphStore::with_options(GraphOptions::undirected());
        undirected.add_nodes_from(["A", "B"]).unwrap();
        let result = undirected.add_directed_edge_with_key("e", "A", "B");
        assert!(matches!(result, Err(GraphError::Usage { .. })));

        let key = undirected.add_edge_with_key("e", "A", "B").unwrap();
        assert!(!undirected.is_directed(key).unwrap());
    }

    #[test]
    fn test_simple_graph_rejects_parallel_edges() {
        let mut store = GraphStore::new();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_directed_edge("A", "B").unwrap();

        assert!(matches!(
            store.add_directed_edge("A", "B"),
            Err(GraphError::Usage { .. })
        ));
        // The reverse direction and the undirected kind are distinct pairs.
        store.add_directed_edge("B", "A").unwrap();
        store.add_undirected_edge("A", "B").unwrap();
        assert!(matches!(
            store.add_undirected_edge("B", "A"),
            Err(GraphError::Usage { .. })
        ));
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_multiple_edges_between_nodes() {
        let mut store = multi();
        store.add_nodes_from(["A", "B"]).unwrap();

        let e1 = store.add_edge("A", "B").unwrap();
        let e2 = store.add_edge("A", "B").unwrap();
        let e3 = store.add_edge("A", "B").unwrap();

        assert_eq!(store.edge_count(), 3);
        assert_ne!(e1, e2);
        assert_ne!(e2, e3);
    }

    #[test]
    fn test_generated_keys_skip_taken_ones() {
        let mut store = multi();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_edge_with_key("e0", "A", "B").unwrap();

        let generated = store.add_edge("A", "B").unwrap();
        assert_eq!(generated, "e1");
    }

    #[test]
    fn test_self_loops_can_be_disallowed() {
        let mut store = GraphStore::with_options(GraphOptions::default().with_self_loops(false));
        store.add_node("A").unwrap();

        assert!(matches!(
            store.add_edge("A", "A"),
            Err(GraphError::Usage { .. })
        ));

        let mut store = GraphStore::new();
        store.add_node("A").unwrap();
        let key = store.add_edge("A", "A").unwrap();
        assert!(store.is_self_loop(key).unwrap());
    }

    #[test]
    fn test_merge_edge_with_key() {
        let mut store = GraphStore::with_options(GraphOptions::undirected());
        store.merge_edge_with_key("1--2", 1, 2).unwrap();

        assert!(store.has_node(1));
        assert!(store.has_node("2"));
        assert_eq!(store.edge_count(), 1);

        // Same key, same endpoints (either order for undirected): no-op
        store.merge_edge_with_key("1--2", 2, 1).unwrap();
        assert_eq!(store.edge_count(), 1);

        store.add_node(3).unwrap();
        assert!(matches!(
            store.merge_edge_with_key("1--2", 1, 3),
            Err(GraphError::Usage { .. })
        ));
    }

    #[test]
    fn test_drop_edge() {
        let mut store = GraphStore::new();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_edge_with_key("e", "A", "B").unwrap();

        let dropped = store.drop_edge("e").unwrap();
        assert_eq!(dropped.key, "e");
        assert_eq!(store.edge_count(), 0);
        assert!(store.entry(&NodeKey::new("A")).unwrap().is_isolated());
        assert!(store.entry(&NodeKey::new("B")).unwrap().is_isolated());

        assert_eq!(
            store.drop_edge("e"),
            Err(GraphError::EdgeNotFound {
                operation: "drop_edge",
                key: EdgeKey::new("e"),
            })
        );
    }

    #[test]
    fn test_drop_node_removes_incident_edges() {
        let mut store = multi();
        store.add_nodes_from(["A", "B", "C"]).unwrap();
        store.add_directed_edge_with_key("A->B", "A", "B").unwrap();
        store.add_directed_edge_with_key("C->A", "C", "A").unwrap();
        store.add_undirected_edge_with_key("A--C", "A", "C").unwrap();
        store.add_directed_edge_with_key("A->A", "A", "A").unwrap();
        store.add_directed_edge_with_key("B->C", "B", "C").unwrap();

        store.drop_node("A").unwrap();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert!(store.has_edge("B->C"));
        let b = store.entry(&NodeKey::new("B")).unwrap();
        assert!(b.inbound.is_empty());
        let c = store.entry(&NodeKey::new("C")).unwrap();
        assert!(c.undirected.is_empty());
        assert!(c.outbound.is_empty());

        assert!(matches!(
            store.drop_node("A"),
            Err(GraphError::NotFound { operation: "drop_node", .. })
        ));
    }

    #[test]
    fn test_edge_records_registration_order() {
        let mut store = multi();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_edge_with_key("x", "A", "B").unwrap();
        store.add_edge_with_key("y", "B", "A").unwrap();
        store.add_edge_with_key("z", "A", "B").unwrap();
        store.drop_edge("y").unwrap();
        store.add_edge_with_key("y", "B", "A").unwrap();

        let keys: Vec<_> = store.edge_records().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "z", "y"]);
    }

    #[test]
    fn test_clear() {
        let mut store = GraphStore::new();
        store.add_nodes_from(["A", "B"]).unwrap();
        store.add_edge("A", "B").unwrap();

        store.clear_edges();
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 0);
        store.add_edge("A", "B").unwrap();

        store.clear();
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 0);
    }
}
