//! Edge records
//!
//! An edge is identified by its own key, independent of the keys of the
//! nodes it joins. Several edges may join the same pair of endpoints.

use super::types::{EdgeKey, NodeKey};
use serde::{Deserialize, Serialize};

/// A directed or undirected edge
///
/// The `(source, target)` order is meaningful only for directed edges. For
/// undirected edges it is kept as given at insertion but never consulted
/// when matching endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub key: EdgeKey,

    /// Source node (edge goes FROM this node when directed)
    pub source: NodeKey,

    /// Target node (edge goes TO this node when directed)
    pub target: NodeKey,

    pub directed: bool,
}

impl Edge {
    pub(crate) fn new(key: EdgeKey, source: NodeKey, target: NodeKey, directed: bool) -> Self {
        Edge {
            key,
            source,
            target,
            directed,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: &NodeKey, node2: &NodeKey) -> bool {
        (&self.source == node1 && &self.target == node2)
            || (&self.source == node2 && &self.target == node1)
    }

    /// Whether the edge joins exactly the given endpoints, honoring
    /// direction for directed edges only.
    pub fn joins(&self, source: &NodeKey, target: &NodeKey) -> bool {
        if self.directed {
            &self.source == source && &self.target == target
        } else {
            self.connects(source, target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(key: &str, source: &str, target: &str, directed: bool) -> Edge {
        Edge::new(key.into(), source.into(), target.into(), directed)
    }

    #[test]
    fn test_self_loop() {
        assert!(edge("l", "A", "A", true).is_self_loop());
        assert!(!edge("e", "A", "B", true).is_self_loop());
    }

    #[test]
    fn test_joins_respects_direction() {
        let a = NodeKey::new("A");
        let b = NodeKey::new("B");

        let directed = edge("e", "A", "B", true);
        assert!(directed.joins(&a, &b));
        assert!(!directed.joins(&b, &a));
        assert!(directed.connects(&b, &a));

        let undirected = edge("u", "A", "B", false);
        assert!(undirected.joins(&a, &b));
        assert!(undirected.joins(&b, &a));
    }
}
