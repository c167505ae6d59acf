//! Adjacency index
//!
//! Holds the [`NodeEntry`] of every registered node and keeps both
//! endpoints of an edge in step on every insertion and removal. Queries
//! read it directly, which makes per-node traversal proportional to the
//! node's degree rather than to the edge count.

use super::edge::Edge;
use super::linked::LinkedKeys;
use super::node::NodeEntry;
use super::types::NodeKey;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    nodes: LinkedKeys<NodeKey, NodeEntry>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with empty collections. Returns false if the node
    /// was already registered.
    pub(crate) fn register(&mut self, node: NodeKey) -> bool {
        self.nodes.push_back(node, NodeEntry::new())
    }

    /// Discard a node's record. The caller disconnects its edges first.
    pub(crate) fn unregister(&mut self, node: &NodeKey) -> Option<NodeEntry> {
        let entry = self.nodes.remove(node)?;
        debug_assert!(entry.is_isolated(), "node {} unregistered with edges", node);
        Some(entry)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Drop every adjacency entry while keeping the nodes registered
    pub(crate) fn clear_edges(&mut self) {
        for entry in self.nodes.values_mut() {
            *entry = NodeEntry::new();
        }
    }

    /// Insert `edge` into the collections of both endpoints.
    ///
    /// Directed: `source.out[target]` and `target.in[source]`.
    /// Undirected: `source.undirected[target]` and
    /// `target.undirected[source]`, a single entry for self-loops.
    pub(crate) fn connect(&mut self, edge: &Edge) {
        debug!(
            "Connecting edge {} ({} {} {})",
            edge.key,
            edge.source,
            if edge.directed { "->" } else { "--" },
            edge.target
        );

        if edge.directed {
            self.entry_mut(&edge.source)
                .outbound
                .insert(&edge.target, &edge.key);
            self.entry_mut(&edge.target)
                .inbound
                .insert(&edge.source, &edge.key);
        } else {
            self.entry_mut(&edge.source)
                .undirected
                .insert(&edge.target, &edge.key);
            if !edge.is_self_loop() {
                self.entry_mut(&edge.target)
                    .undirected
                    .insert(&edge.source, &edge.key);
            }
        }
    }

    /// Inverse of [`AdjacencyIndex::connect`]
    pub(crate) fn disconnect(&mut self, edge: &Edge) {
        debug!("Disconnecting edge {}", edge.key);

        if edge.directed {
            self.entry_mut(&edge.source)
                .outbound
                .remove(&edge.target, &edge.key);
            self.entry_mut(&edge.target)
                .inbound
                .remove(&edge.source, &edge.key);
        } else {
            self.entry_mut(&edge.source)
                .undirected
                .remove(&edge.target, &edge.key);
            if !edge.is_self_loop() {
                self.entry_mut(&edge.target)
                    .undirected
                    .remove(&edge.source, &edge.key);
            }
        }
    }

    pub fn get(&self, node: &NodeKey) -> Option<&NodeEntry> {
        self.nodes.get(node)
    }

    pub fn contains(&self, node: &NodeKey) -> bool {
        self.nodes.contains_key(node)
    }

    /// Registered node keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = &NodeKey> + '_ {
        self.nodes.iter().map(|(node, _)| node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Endpoints are validated by the store before any edge reaches the
    // index; a miss here means the mutation path skipped that check.
    fn entry_mut(&mut self, node: &NodeKey) -> &mut NodeEntry {
        match self.nodes.get_mut(node) {
            Some(entry) => entry,
            None => panic!("edge endpoint {} is not a registered node", node),
        }
    }
}
